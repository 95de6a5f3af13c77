//! # Error Types
//!
//! Domain-specific error types for pokerhall-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pokerhall-core errors (this file)                                     │
//! │  ├── ErrorKind        - The taxonomy every layer reports in            │
//! │  ├── CoreError        - Authorization and validation failures          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pokerhall-db errors (separate crate)                                  │
//! │  └── DbError          - Persistence failures and seat conflicts        │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - What clients see (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                          DbError ───┴─► ErrorKind → ApiError → Client  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::access::Action;

// =============================================================================
// Error Kind
// =============================================================================

/// The error taxonomy shared by every layer.
///
/// Each concrete error type reports one of these so the transport can
/// translate failures without knowing which crate produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// A unique constraint would be violated (e.g. fiscal code).
    DuplicateKey,
    /// Malformed or out-of-range input.
    InvalidArgument,
    /// The seat already has a player.
    SeatOccupied,
    /// The player already holds a seat in the same event.
    AlreadySeated,
    /// The caller's role does not permit the action.
    Unauthorized,
    /// A concurrent mutation won the race.
    ConflictingWrite,
    /// Infrastructure failure (database unavailable, etc.).
    Internal,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The access policy denied the action.
    ///
    /// ## When This Occurs
    /// - A PLAYER tries to create an event or record a score
    /// - No authenticated identity was supplied at all
    #[error("Not authorized to {action}")]
    Unauthorized { action: Action },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Unauthorized { .. } => ErrorKind::Unauthorized,
            CoreError::Validation(_) => ErrorKind::InvalidArgument,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Every variant maps to [`ErrorKind::InvalidArgument`].
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g. fiscal code with punctuation).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "table_count".to_string(),
            min: 1,
            max: 1000,
        };
        assert_eq!(err.to_string(), "table_count must be between 1 and 1000");
    }

    #[test]
    fn test_unauthorized_message() {
        let err = CoreError::Unauthorized {
            action: Action::CreateEvent,
        };
        assert_eq!(err.to_string(), "Not authorized to create events");
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NotFinite {
            field: "bluff_score".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_kind_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorKind::AlreadySeated).unwrap();
        assert_eq!(json, "\"ALREADY_SEATED\"");
    }
}
