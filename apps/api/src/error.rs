//! Error types for the HTTP API.
//!
//! ## Response Shape
//! Every failure is returned as JSON:
//! ```json
//! {
//!   "code": "SEAT_OCCUPIED",
//!   "message": "Seat 5b0c... is already occupied"
//! }
//! ```
//!
//! `code` is the shared taxonomy kind (plus `UNAUTHENTICATED`); the HTTP
//! status follows from it. Internal failures are logged in full and
//! returned with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pokerhall_core::{CoreError, ErrorKind, ValidationError};
use pokerhall_db::DbError;
use serde::Serialize;
use tracing::error;

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Unique key already taken (409)
    DuplicateKey,

    /// Input validation failed (400)
    InvalidArgument,

    /// Seat already has a player (409)
    SeatOccupied,

    /// Player already has a seat in the event (409)
    AlreadySeated,

    /// Role does not permit the action (403)
    Unauthorized,

    /// Lost a concurrent update (409)
    ConflictingWrite,

    /// Missing, invalid or expired credentials (401)
    Unauthenticated,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::DuplicateKey
            | ErrorCode::SeatOccupied
            | ErrorCode::AlreadySeated
            | ErrorCode::ConflictingWrite => StatusCode::CONFLICT,
            ErrorCode::Unauthorized => StatusCode::FORBIDDEN,
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::DuplicateKey => ErrorCode::DuplicateKey,
            ErrorKind::InvalidArgument => ErrorCode::InvalidArgument,
            ErrorKind::SeatOccupied => ErrorCode::SeatOccupied,
            ErrorKind::AlreadySeated => ErrorCode::AlreadySeated,
            ErrorKind::Unauthorized => ErrorCode::Unauthorized,
            ErrorKind::ConflictingWrite => ErrorCode::ConflictingWrite,
            ErrorKind::Internal => ErrorCode::Internal,
        }
    }
}

/// API error returned to clients.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthenticated, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidArgument, message)
    }

    /// Logs `detail` and returns a generic internal error.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Internal error");
        ApiError::new(ErrorCode::Internal, "Internal server error")
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err.kind() {
            ErrorKind::Internal => ApiError::internal(err),
            kind => ApiError::new(kind.into(), err.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::new(err.kind().into(), err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid(err.to_string())
    }
}

// Malformed bodies, query strings and paths all count as invalid input,
// whatever status axum would have picked.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::DuplicateKey.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::SeatOccupied.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::AlreadySeated.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::Unauthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::InvalidArgument.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_db_errors_keep_their_kind() {
        let err: ApiError = DbError::SeatOccupied {
            seat_id: "s-1".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::SeatOccupied);

        let err: ApiError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_serialized_code() {
        let err = ApiError::unauthenticated("Missing bearer token");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UNAUTHENTICATED");
        assert_eq!(json["message"], "Missing bearer token");
    }
}
