//! # Kasir API
//!
//! HTTP interface for Kasir POS.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir API Server                                 │
//! │                                                                         │
//! │  Client ───► axum (8080) ───► routes ───► kasir-core ───► kasir-db     │
//! │                  │                                           │          │
//! │             TraceLayer                                    SQLite        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary in `main.rs` loads [`config::ApiConfig`], opens the database
//! and serves [`routes::router`]. Tests drive the same router in-process.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;
pub use state::AppState;
