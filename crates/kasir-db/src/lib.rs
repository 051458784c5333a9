//! # kasir-db: Database Layer for Kasir POS
//!
//! This crate provides database access for the Kasir POS system.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/checkout)                                     │
//! │       │                                                                 │
//! │       ▼  kasir_core::checkout(&db.store(), &cart)                      │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kasir-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  SqliteStore  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (store.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │◄───│ Repositories  │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (./kasir.db, WAL)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalogue and transaction repositories
//! - [`store`] - `SalesStore` implementation for checkout and reports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasir_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./kasir.db")).await?;
//!
//! let products = db.products().list(Some("kopi")).await?;
//! let txn = kasir_core::checkout(&db.store(), &cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{SqliteStore, SqliteUnit};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;
