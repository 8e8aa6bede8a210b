//! # Validation Module
//!
//! Input validation utilities for swapdesk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP boundary (apps/api)                                     │
//! │  └── JSON shape (deserialization)                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields (name, email)                                     │
//! │  ├── Length limits                                                     │
//! │  └── Amount text accepted by the swap form                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE (email)                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_EMAIL_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Returns the trimmed text, or `None` when it is blank.
pub fn non_blank(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Validates a user's display name.
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_NAME_LEN` characters
///
/// ## Example
/// ```rust
/// use swapdesk_core::validation::validate_user_name;
///
/// assert!(validate_user_name("John Doe").is_ok());
/// assert!(validate_user_name("  ").is_err());
/// ```
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_EMAIL_LEN` characters
///
/// Uniqueness is enforced by the database, not here.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Amount Input
// =============================================================================

/// Checks that swap form input looks numeric: ASCII digits with at most one
/// decimal point. Empty text is allowed (it clears the field).
///
/// ## User Workflow
/// ```text
/// Keystroke in "Sell" input
///      │
///      ▼
/// validate_amount_input("12.5") ← THIS FUNCTION
///      │
///      ├── "12.5", "", ".", "7." → accepted, form recalculates
///      │
///      └── "1.2.3", "1e5", "-3", "abc" → rejected, input unchanged
/// ```
pub fn validate_amount_input(input: &str) -> ValidationResult<()> {
    let mut seen_point = false;

    for ch in input.chars() {
        match ch {
            '0'..='9' => {}
            '.' if !seen_point => seen_point = true,
            _ => {
                return Err(ValidationError::InvalidFormat {
                    field: "amount".to_string(),
                    reason: "must contain only digits and at most one decimal point"
                        .to_string(),
                })
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_name() {
        assert!(validate_user_name("John Doe").is_ok());
        assert!(validate_user_name("").is_err());
        assert!(validate_user_name("   ").is_err());
        assert!(validate_user_name(&"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email(&"a".repeat(MAX_EMAIL_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_amount_input() {
        for ok in ["", "0", "12", "12.5", ".", ".5", "7."] {
            assert!(validate_amount_input(ok).is_ok(), "{:?}", ok);
        }
        for bad in ["1.2.3", "1e5", "-3", "abc", " 1", "1,000", "١٢"] {
            assert!(validate_amount_input(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  ada "), Some("ada"));
        assert_eq!(non_blank("   "), None);
    }
}
