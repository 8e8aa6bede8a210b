//! Price client configuration.
//!
//! Loaded from environment variables with fallback to defaults.

use std::env;
use std::time::Duration;

use crate::error::{PriceError, PriceResult};

/// Public price feed used by default.
pub const DEFAULT_PRICES_URL: &str = "https://interview.switcheo.com/prices.json";

/// Price client configuration.
#[derive(Debug, Clone)]
pub struct PriceConfig {
    /// Endpoint returning a JSON array of price rows.
    pub url: String,

    /// How long a fetched list is reused.
    /// Default: 60 seconds
    pub stale_after: Duration,

    /// Extra attempts after the first failure.
    /// Default: 2 (3 attempts total)
    pub retries: u32,

    /// First wait between attempts; doubles each time.
    /// Default: 1 second
    pub initial_backoff: Duration,

    /// Upper bound for a single wait.
    /// Default: 30 seconds
    pub max_backoff: Duration,

    /// Per-request timeout.
    /// Default: 10 seconds
    pub request_timeout: Duration,
}

impl Default for PriceConfig {
    fn default() -> Self {
        PriceConfig {
            url: DEFAULT_PRICES_URL.to_string(),
            stale_after: Duration::from_secs(60),
            retries: 2,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl PriceConfig {
    /// Default policy against a custom endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        PriceConfig {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the cache lifetime. Zero disables caching.
    pub fn stale_after(mut self, ttl: Duration) -> Self {
        self.stale_after = ttl;
        self
    }

    /// Sets the number of retries after the first attempt.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the backoff bounds.
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Loads `PRICES_URL`, `PRICES_STALE_SECS` and `PRICES_RETRIES`.
    pub fn from_env() -> PriceResult<Self> {
        let defaults = PriceConfig::default();

        Ok(PriceConfig {
            url: env::var("PRICES_URL").unwrap_or(defaults.url),

            stale_after: match env::var("PRICES_STALE_SECS") {
                Ok(secs) => Duration::from_secs(
                    secs.parse()
                        .map_err(|_| PriceError::InvalidConfig("PRICES_STALE_SECS".to_string()))?,
                ),
                Err(_) => defaults.stale_after,
            },

            retries: match env::var("PRICES_RETRIES") {
                Ok(retries) => retries
                    .parse()
                    .map_err(|_| PriceError::InvalidConfig("PRICES_RETRIES".to_string()))?,
                Err(_) => defaults.retries,
            },

            ..defaults
        })
    }
}
