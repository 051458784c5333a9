//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │ TransactionLine │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  transaction_id │       │
//! │  │  name           │ 1 │  total_amount   │ 1 │  product_id     │       │
//! │  │  unit_price     │───│  created_at     │───│  product_name   │       │
//! │  │  stock_quantity │  *│  lines          │  *│  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   │  subtotal       │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartLine     │   │   SalesReport   │   │    Category     │       │
//! │  │  (input only)   │   │  (computed)     │   │  (catalogue)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `TransactionLine` copies the product name at the time of sale, so a
//! later rename never rewrites history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Store-generated product identity.
pub type ProductId = i64;

/// Store-generated transaction identity.
pub type TransactionId = i64;

/// Store-generated category identity.
pub type CategoryId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-generated identifier.
    pub id: ProductId,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Price in the smallest currency unit.
    pub unit_price: i64,

    /// Units on hand. Only checkout and product updates change it.
    pub stock_quantity: i64,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_units(self.unit_price)
    }
}

/// Payload for creating or fully replacing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub unit_price: i64,
    pub stock_quantity: i64,
}

// =============================================================================
// Category
// =============================================================================

/// A product category, persisted like any other entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

/// Payload for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Checkout Input
// =============================================================================

/// One line of a checkout cart. Never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line.
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        CartLine {
            product_id,
            quantity,
        }
    }
}

/// What the Product Ledger returns for one product id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PriceAndStock {
    pub name: String,
    pub unit_price: i64,
    pub stock_quantity: i64,
}

impl PriceAndStock {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_units(self.unit_price)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A line item of a transaction.
/// Uses the snapshot pattern to freeze the product name at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionLine {
    /// Owning transaction. Zero until the header has been inserted.
    pub transaction_id: TransactionId,
    pub product_id: ProductId,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// unit_price × quantity at time of sale.
    pub subtotal: i64,
}

impl TransactionLine {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_units(self.subtotal)
    }
}

/// A completed checkout: one header plus its lines in cart order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: TransactionId,
    /// Sum of the lines' subtotals.
    pub total_amount: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "details")]
    pub lines: Vec<TransactionLine>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_units(self.total_amount)
    }
}

/// A transaction header as stored, without its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionHeader {
    pub id: TransactionId,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl TransactionHeader {
    /// Attaches lines to produce the full transaction.
    pub fn with_lines(self, lines: Vec<TransactionLine>) -> Transaction {
        Transaction {
            id: self.id,
            total_amount: self.total_amount,
            created_at: self.created_at,
            lines,
        }
    }
}

// =============================================================================
// Sales Report
// =============================================================================

/// Inclusive instant range a report aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportRange {
    /// Creates a range from already-normalized instants.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        ReportRange { start, end }
    }

    /// Returns true if `at` falls within the range, both ends included.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// The product with the highest summed quantity in a report range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BestSeller {
    pub name: String,
    pub quantity_sold: i64,
}

impl BestSeller {
    /// Placeholder reported when nothing sold in the range.
    pub fn none() -> Self {
        BestSeller {
            name: "-".to_string(),
            quantity_sold: 0,
        }
    }
}

/// Aggregated sales over a date range. Computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    pub total_revenue: i64,
    pub total_transaction_count: i64,
    pub best_seller: BestSeller,
}

impl SalesReport {
    /// The report for a range with no transactions.
    pub fn empty() -> Self {
        SalesReport {
            total_revenue: 0,
            total_transaction_count: 0,
            best_seller: BestSeller::none(),
        }
    }
}

/// Raw aggregates for one report, read from a single view of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTotals {
    pub revenue: Money,
    pub transaction_count: i64,
    pub top_product: Option<BestSeller>,
}

// =============================================================================
// Unit Tests
// =============================================================================
