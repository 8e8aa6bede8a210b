//! # swapdesk API
//!
//! JSON users API over SQLite.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP ──► TraceLayer ──► CorsLayer ──► routes.rs (axum handlers)       │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                                   service.rs (UserService)             │
//! │                                   validation: swapdesk-core            │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                                   swapdesk-db (UserRepository)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::{build_router, ApiDoc};
pub use service::UserService;
pub use state::AppState;
