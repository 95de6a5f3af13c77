//! # Validation Module
//!
//! Input validation utilities for Poker Hall.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (Rust)                                          │
//! │  ├── Type validation (JSON deserialization)                            │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (fiscal code, seat numbers, seated players)    │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pokerhall_core::validation::{normalize_fiscal_code, validate_person_name};
//!
//! assert_eq!(normalize_fiscal_code(" rssmra85m01h501z ").unwrap(), "RSSMRA85M01H501Z");
//! assert!(validate_person_name("name", "").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::ScoreComponents;
use crate::{MAX_EVENT_NAME_LEN, MAX_NAME_LEN, MAX_PLAYER_AGE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest fiscal code accepted.
const MAX_FISCAL_CODE_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, bounded text field and returns it trimmed.
fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a player's name or surname.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_person_name(field: &str, value: &str) -> ValidationResult<String> {
    validate_text(field, value, MAX_NAME_LEN)
}

/// Validates an event name.
pub fn validate_event_name(name: &str) -> ValidationResult<String> {
    validate_text("name", name, MAX_EVENT_NAME_LEN)
}

/// Validates a fiscal code and returns its canonical (upper case) form.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - ASCII letters and digits only
///
/// Both registration and login go through this function, so lookups match
/// regardless of the case the user typed.
pub fn normalize_fiscal_code(code: &str) -> ValidationResult<String> {
    let code = validate_text("fiscal_code", code, MAX_FISCAL_CODE_LEN)?;

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "fiscal_code".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(code.to_ascii_uppercase())
}

/// Validates a plain-text password before hashing.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an age in years.
pub fn validate_age(age: i64) -> ValidationResult<()> {
    if !(0..=MAX_PLAYER_AGE).contains(&age) {
        return Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            min: 0,
            max: MAX_PLAYER_AGE,
        });
    }
    Ok(())
}

/// Rejects NaN and infinities. Any finite value, negative included, passes.
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates all four components of a score recording.
///
/// No range check: negative values represent losses and are legal. The
/// sum of the four must also be finite.
pub fn validate_score_components(components: &ScoreComponents) -> ValidationResult<()> {
    validate_finite("final_capital", components.final_capital)?;
    validate_finite("bluff_score", components.bluff_score)?;
    validate_finite("win_score", components.win_score)?;
    validate_finite("crupier_vote", components.crupier_vote)?;
    validate_finite("total", components.total())?;
    Ok(())
}

/// Validates a layout count (tables, seats) in `1..=max`.
pub fn validate_count(field: &str, value: i64, max: u32) -> ValidationResult<u32> {
    if value < 1 || value > i64::from(max) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: i64::from(max),
        });
    }
    // In range 1..=u32::MAX by the check above.
    Ok(value as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
