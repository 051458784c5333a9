//! # kasir-core: Domain Logic for Kasir POS
//!
//! This crate is the heart of Kasir POS. It owns the domain types, money
//! arithmetic, validation rules and the two transactional flows of the
//! system: checkout and sales reporting.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    POST /api/checkout     GET /api/report     CRUD routes      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ checkout  │  │  report   │  │   store   │  │ validation│  │   │
//! │  │   │  Engine   │  │Aggregator │  │  traits   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                                       │                         │   │
//! │  │   NO I/O • storage is reached only through the store traits    │   │
//! │  └───────────────────────────────────────┼─────────────────────────┘   │
//! │                                          │ implemented by               │
//! │  ┌───────────────────────────────────────▼─────────────────────────┐   │
//! │  │                    kasir-db (SQLite adapter)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, SalesReport, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`store`] - Capability traits the storage adapter implements
//! - [`checkout`] - The Checkout Engine
//! - [`report`] - The Sales Report Aggregator
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::from_units(5000);
//! let subtotal = price.checked_mul_quantity(2).unwrap();
//! assert_eq!(subtotal.units(), 10000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::checkout;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::get_sales_report;
pub use store::{CheckoutUnit, SalesStore};
pub use types::*;
