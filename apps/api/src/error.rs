//! # API Error Type
//!
//! Unified error type for the HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in swapdesk                               │
//! │                                                                         │
//! │  UserService method                                                    │
//! │  Result<T, ApiError>                                                   │
//! │         │                                                               │
//! │         ├── ValidationError ─────────► 400 VALIDATION_ERROR            │
//! │         ├── DbError::NotFound ───────► 404 NOT_FOUND                   │
//! │         ├── DbError::UniqueViolation ► 409 CONFLICT                    │
//! │         └── any other DbError ───────► 500 INTERNAL (detail logged)    │
//! │                                                                         │
//! │  routes.rs turns it into:                                              │
//! │  HTTP 409  {"error": "User already exists", "code": "CONFLICT"}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use swapdesk_db::DbError;
use utoipa::ToSchema;

/// Message for every unexpected failure. The detail only goes to the log.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Result type alias for service operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by the service layer.
///
/// ## Serialization
/// ```json
/// { "error": "User not found", "code": "NOT_FOUND" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ApiError {
    /// Human-readable error message for display
    #[serde(rename = "error")]
    #[schema(example = "User not found")]
    pub message: String,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Unique constraint hit (409)
    Conflict,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::Internal => 500,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message)
    }

    /// Creates an internal error with the generic message.
    pub fn internal() -> Self {
        ApiError::new(ErrorCode::Internal, INTERNAL_MESSAGE)
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.code.status()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::not_found(format!("{} not found", entity)),
            DbError::UniqueViolation { field, .. } => {
                ApiError::conflict(format!("{} already exists", field))
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!(error = %other, "Database operation failed");
                ApiError::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        assert_eq!(
            ApiError::from(DbError::not_found("User", 7)),
            ApiError::not_found("User not found")
        );
        assert_eq!(
            ApiError::from(DbError::duplicate("users.email", "a@b.c")).status(),
            409
        );

        let internal = ApiError::from(DbError::QueryFailed("disk I/O error".into()));
        assert_eq!(internal.status(), 500);
        assert_eq!(internal.message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_serialized_shape() {
        let body = serde_json::to_value(ApiError::conflict("User already exists")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "User already exists", "code": "CONFLICT"})
        );
    }
}
