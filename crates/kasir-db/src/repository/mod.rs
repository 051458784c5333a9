//! # Repository Module
//!
//! Database repository implementations for Kasir POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │  db.products().list(Some("kopi"))                              │
//! │       ▼                                                                 │
//! │  ProductRepository / CategoryRepository / TransactionRepository        │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout and reporting do not go through these repositories; they run on
//! [`crate::store::SqliteStore`].
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD with name filter
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`TransactionRepository`](transaction::TransactionRepository) - Lookup and delete

use chrono::{DateTime, SubsecRound, Utc};

pub mod category;
pub mod product;
pub mod transaction;

/// Current time at whole-second precision.
///
/// Every stored timestamp goes through here so they all share one RFC 3339
/// shape and compare correctly as text.
pub(crate) fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Escapes `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` pattern.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
