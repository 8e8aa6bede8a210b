//! # Error Types
//!
//! Domain-specific error types for swapdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  swapdesk-core errors (this file)                                      │
//! │  ├── CoreError        - Arithmetic and domain failures                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  swapdesk-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  swapdesk-prices errors (separate crate)                               │
//! │  └── PriceError       - Price feed failures                            │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What HTTP clients see (status + JSON body)     │
//! │                                                                         │
//! │  Flow: ValidationError / DbError → ApiError → Client                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An argument is outside the domain of the function.
    ///
    /// ## When This Occurs
    /// - `sum_to_n_*` called with a negative `n`
    /// - Text or float input that is not a whole number
    /// - Recursive sum asked for more than `MAX_RECURSION_N` levels
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The result does not fit in the return type.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CoreError::InvalidArgument(message.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything touches the database.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., amount text with two decimal points).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// At least one of several optional fields must be present.
    #[error("At least one of {fields:?} must be provided")]
    AtLeastOne { fields: Vec<String> },
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
    fn test_error_messages() {
        let err = CoreError::invalid_argument("n must be a non-negative integer");
        assert_eq!(
            err.to_string(),
            "Invalid argument: n must be a non-negative integer"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::AtLeastOne {
            fields: vec!["email".to_string(), "name".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "At least one of [\"email\", \"name\"] must be provided"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
