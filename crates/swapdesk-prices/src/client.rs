//! # Price Client
//!
//! HTTP client for the price feed with retry and a time-based cache.
//!
//! ## Request Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  prices()                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  lock cache ──── fresh (< stale_after)? ──── yes ──► cached rows        │
//! │     │                                                                   │
//! │     no                                                                  │
//! │     ▼                                                                   │
//! │  attempt 1 ──✗──► sleep ~1s ──► attempt 2 ──✗──► sleep ~2s ──► attempt 3│
//! │     │                              │                              │     │
//! │     ✓                              ✓                              ✗     │
//! │     ▼                              ▼                              ▼     │
//! │  store + return ◄──────────────────┘                      PriceError    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cache lock is held across the fetch, so concurrent callers wait for
//! the one in-flight request instead of starting their own.

use std::sync::Arc;
use std::time::Instant;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::PriceConfig;
use crate::error::{PriceError, PriceResult};
use swapdesk_core::PriceRow;

/// A fetched price list and when it was fetched.
#[derive(Debug)]
struct CachedPrices {
    fetched_at: Instant,
    rows: Arc<Vec<PriceRow>>,
}

/// Price feed client.
///
/// Cloning is cheap and clones share one cache.
///
/// ## Usage
/// ```rust,ignore
/// let client = PriceClient::new(PriceConfig::from_env()?)?;
/// let rows = client.prices().await?;
/// let form = SwapForm::new(&rows);
/// ```
#[derive(Debug, Clone)]
pub struct PriceClient {
    http: reqwest::Client,
    config: PriceConfig,
    cache: Arc<Mutex<Option<CachedPrices>>>,
}

impl PriceClient {
    /// Creates a client.
    pub fn new(config: PriceConfig) -> PriceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(PriceClient {
            http,
            config,
            cache: Arc::new(Mutex::new(None)),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &PriceConfig {
        &self.config
    }

    /// Returns the price list, from cache when still fresh.
    pub async fn prices(&self) -> PriceResult<Arc<Vec<PriceRow>>> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < self.config.stale_after {
                debug!(count = cached.rows.len(), "Serving cached prices");
                return Ok(Arc::clone(&cached.rows));
            }
        }

        let rows = Arc::new(self.fetch_with_retry().await?);
        *cache = Some(CachedPrices {
            fetched_at: Instant::now(),
            rows: Arc::clone(&rows),
        });

        Ok(rows)
    }

    /// Drops the cached list; the next `prices()` call fetches.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
        debug!("Price cache invalidated");
    }

    /// Fetches with up to `retries` extra attempts.
    async fn fetch_with_retry(&self) -> PriceResult<Vec<PriceRow>> {
        let mut backoff = self.create_backoff();
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            match self.fetch_once().await {
                Ok(rows) => {
                    info!(count = rows.len(), attempt, "Fetched prices");
                    return Ok(rows);
                }
                Err(e) if attempt <= self.config.retries => {
                    let delay = backoff.next_backoff().unwrap_or(self.config.max_backoff);
                    warn!(error = %e, attempt, ?delay, "Price fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!(error = %e, attempt, "Price fetch failed, giving up");
                    return Err(e);
                }
            }
        }
    }

    /// One GET against the feed.
    async fn fetch_once(&self) -> PriceResult<Vec<PriceRow>> {
        let response = self.http.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::Status {
                status: status.as_u16(),
                url: self.config.url.clone(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.config.initial_backoff,
            max_interval: self.config.max_backoff,
            multiplier: 2.0,
            max_elapsed_time: None, // Attempts are bounded by `retries`
            ..Default::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
