//! # swapdesk-prices: Price Feed Client
//!
//! Fetches `{currency, date, price}` rows from the public price feed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  prices.json (third-party, read-only)                                  │
//! │       │  HTTPS GET                                                      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               swapdesk-prices (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   PriceConfig ──► PriceClient ── retry/backoff ── TTL cache     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │  Vec<PriceRow>                                                 │
//! │       ▼                                                                 │
//! │  swapdesk_core::SwapForm (keeps the newest row per currency)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::PriceClient;
pub use config::{PriceConfig, DEFAULT_PRICES_URL};
pub use error::{PriceError, PriceResult};
