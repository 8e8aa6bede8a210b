//! # Domain Types
//!
//! Core domain types used throughout swapdesk.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    NewUser      │   │  UserChanges    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  name           │   │  name?          │       │
//! │  │  name           │   │  email          │   │  email?         │       │
//! │  │  email (unique) │   │  (validated)    │   │  (partial)      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   UserQuery     │   │    PriceRow     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  name?  AND     │   │  currency       │                             │
//! │  │  email?         │   │  date (UTC)     │                             │
//! │  │  (≥ 1 present)  │   │  price (f64)    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{
    non_blank, validate_email, validate_user_name, ValidationResult,
};
use crate::ValidationError;

// =============================================================================
// User
// =============================================================================

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[ts(export)]
pub struct User {
    /// Auto-assigned identity.
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i64,

    /// Display name, never empty.
    #[cfg_attr(feature = "openapi", schema(example = "John Doe"))]
    pub name: String,

    /// Email address, unique across users.
    #[cfg_attr(feature = "openapi", schema(example = "john@example.com"))]
    pub email: String,
}

/// A validated user ready to be inserted.
///
/// Fields are private so that every `NewUser` has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Validates and trims the name and email.
    ///
    /// ## Example
    /// ```rust
    /// use swapdesk_core::NewUser;
    ///
    /// let user = NewUser::new(" Ada ", "ada@example.com").unwrap();
    /// assert_eq!(user.name(), "Ada");
    /// assert!(NewUser::new("", "ada@example.com").is_err());
    /// ```
    pub fn new(name: &str, email: &str) -> ValidationResult<Self> {
        let name = name.trim();
        let email = email.trim();

        validate_user_name(name)?;
        validate_email(email)?;

        Ok(NewUser {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// The trimmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The trimmed email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A partial update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    name: Option<String>,
    email: Option<String>,
}

impl UserChanges {
    /// Validates whichever fields are present.
    ///
    /// A present-but-blank field is an error: it would break the non-empty
    /// invariant of the stored row.
    pub fn new(name: Option<&str>, email: Option<&str>) -> ValidationResult<Self> {
        let name = name.map(str::trim);
        let email = email.map(str::trim);

        if let Some(name) = name {
            validate_user_name(name)?;
        }
        if let Some(email) = email {
            validate_email(email)?;
        }

        Ok(UserChanges {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        })
    }

    /// New name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// New email, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// True when neither field is set (the update is a no-op).
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// A conjunctive search filter over name and email.
///
/// ## Invariant
/// At least one field is set; empty strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    name: Option<String>,
    email: Option<String>,
}

impl UserQuery {
    /// Builds a query, dropping empty filters.
    ///
    /// ## Example
    /// ```rust
    /// use swapdesk_core::UserQuery;
    ///
    /// assert!(UserQuery::new(Some("Ada"), None).is_ok());
    /// assert!(UserQuery::new(Some(""), None).is_err());
    /// assert!(UserQuery::new(None, None).is_err());
    /// ```
    pub fn new(name: Option<&str>, email: Option<&str>) -> ValidationResult<Self> {
        let name = name.and_then(non_blank);
        let email = email.and_then(non_blank);

        if name.is_none() && email.is_none() {
            return Err(ValidationError::AtLeastOne {
                fields: vec!["email".to_string(), "name".to_string()],
            });
        }

        Ok(UserQuery {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        })
    }

    /// Name filter, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Email filter, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

// =============================================================================
// Price Row
// =============================================================================

/// One price observation for one currency, as served by the price feed.
///
/// ## Wire Format
/// ```json
/// { "currency": "ETH", "date": "2023-08-29T07:10:52.000Z", "price": 1645.93 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRow {
    /// Currency code (e.g. "ETH").
    pub currency: String,

    /// When the price was observed.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Price in USD.
    pub price: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_trims() {
        let user = NewUser::new("  Ada Lovelace ", " ada@example.com ").unwrap();
        assert_eq!(user.name(), "Ada Lovelace");
        assert_eq!(user.email(), "ada@example.com");
    }

    #[test]
    fn test_new_user_rejects_blank() {
        assert!(NewUser::new("   ", "ada@example.com").is_err());
        assert!(NewUser::new("Ada", "").is_err());
    }

    #[test]
    fn test_user_changes() {
        let changes = UserChanges::new(Some("X"), None).unwrap();
        assert_eq!(changes.name(), Some("X"));
        assert_eq!(changes.email(), None);
        assert!(!changes.is_empty());

        assert!(UserChanges::new(None, None).unwrap().is_empty());
        assert!(UserChanges::new(Some(""), None).is_err());
    }

    #[test]
    fn test_user_query_drops_empty_filters() {
        let query = UserQuery::new(Some(""), Some("ada@example.com")).unwrap();
        assert_eq!(query.name(), None);
        assert_eq!(query.email(), Some("ada@example.com"));
    }

    #[test]
    fn test_price_row_decodes_feed_json() {
        let json = r#"[
            {"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.9337373737374},
            {"currency":"USDC","date":"2023-08-29T07:10:40.000Z","price":1}
        ]"#;
        let rows: Vec<PriceRow> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].currency, "ETH");
        assert_eq!(rows[1].price, 1.0);
    }

    #[test]
    fn test_user_serializes_flat() {
        let user = User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "name": "John Doe", "email": "john@example.com"})
        );
    }
}
