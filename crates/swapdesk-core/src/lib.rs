//! # swapdesk-core: Pure Logic for swapdesk
//!
//! This crate holds every piece of swapdesk that can be expressed as a pure
//! function: the sum-to-n implementations, number formatting, input
//! validation, the domain types shared with the front-end, and the swap form
//! state machine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        swapdesk Architecture                            │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │   apps/api (axum)            │   │   swapdesk-prices (reqwest)  │   │
//! │  │   /api/users CRUD            │   │   prices.json, 60s cache     │   │
//! │  └──────────────┬───────────────┘   └──────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────────────────────▼───────────────┐   │
//! │  │               ★ swapdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌──────────┐ ┌────────────┐ ┌───────────────┐  │   │
//! │  │  │ arithmetic │ │  format  │ │ validation │ │     swap      │  │   │
//! │  │  │ sum_to_n×3 │ │ 1.50M    │ │ name/email │ │  SwapForm     │  │   │
//! │  │  └────────────┘ └──────────┘ └────────────┘ └───────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                 │                                                       │
//! │  ┌──────────────▼──────────────────────────────────────────────────┐   │
//! │  │                 swapdesk-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`arithmetic`] - Three ways to sum 1..n
//! - [`format`] - Human-readable amounts (`1.50M`, `1,234.50`)
//! - [`types`] - Domain types (User, PriceRow, ...)
//! - [`validation`] - Input validation rules
//! - [`swap`] - Swap form state machine
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use swapdesk_core::arithmetic::{sum_to_n_closed_form, sum_to_n_iterative};
//! use swapdesk_core::format::format_large_number;
//!
//! assert_eq!(sum_to_n_iterative(888).unwrap(), 394_716);
//! assert_eq!(sum_to_n_closed_form(888).unwrap(), 394_716);
//! assert_eq!(format_large_number(1_500_000.0), "1.50M");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod arithmetic;
pub mod error;
pub mod format;
pub mod swap;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use swap::{latest_prices, Side, SwapForm, SwapSlot, SwapState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency preselected on the "Sell" side of a fresh swap form.
pub const DEFAULT_FROM_CURRENCY: &str = "ETH";

/// Currency preselected on the "Buy" side of a fresh swap form.
pub const DEFAULT_TO_CURRENCY: &str = "USDC";

/// Largest `n` accepted by the recursive summation.
///
/// Each level of recursion costs a stack frame; beyond this the closed form
/// or the loop should be used.
pub const MAX_RECURSION_N: i64 = 10_000;

/// Maximum length of a user name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;
