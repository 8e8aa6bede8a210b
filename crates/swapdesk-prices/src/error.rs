//! # Price Client Errors
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Failure                          Variant          Retried?             │
//! │  ───────────────────────────────  ───────────────  ────────             │
//! │  DNS / TCP / TLS / timeout        Http             yes                  │
//! │  Non-2xx response                 Status           yes                  │
//! │  Body is not a PriceRow array     Decode           yes                  │
//! │  Bad PRICES_* variable            InvalidConfig    no (startup)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for price operations.
pub type PriceResult<T> = Result<T, PriceError>;

/// Price feed errors.
#[derive(Debug, Error)]
pub enum PriceError {
    /// Transport-level failure.
    #[error("Price request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Price endpoint {url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// The body could not be decoded.
    #[error("Invalid price payload: {0}")]
    Decode(String),

    /// Invalid configuration value.
    #[error("Invalid value for {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for PriceError {
    fn from(err: serde_json::Error) -> Self {
        PriceError::Decode(err.to_string())
    }
}
