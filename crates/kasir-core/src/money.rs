//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer smallest units                                   │
//! │    Rp 5.000 is stored as 5000, a line of 2 is exactly 10000            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::from_units(5000);
//! let line = price.checked_mul_quantity(3).unwrap();
//! assert_eq!(line.units(), 15000);
//!
//! let total = line.checked_add(Money::from_units(2500)).unwrap();
//! assert_eq!(total.units(), 17500);
//! ```
//!
//! Only checked arithmetic is offered; there is no `Add` or `Sum` that could
//! panic or wrap on overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches SQLite INTEGER and leaves room for refunds later
/// - **Single field tuple struct**: zero-cost abstraction over i64, serialized
///   as a bare number
/// - **Checked multiplication**: a line subtotal that overflows is rejected
///   instead of wrapping
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──► × quantity ──► TransactionLine.subtotal
///                                              │
///                                              ▼ Σ
///                                   Transaction.total_amount
///                                              │
///                                              ▼ Σ over a date range
///                                   SalesReport.total_revenue
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from smallest currency units.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let price = Money::from_units(5000);
    /// assert_eq!(price.units(), 5000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in smallest currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let unit_price = Money::from_units(5000);
    /// assert_eq!(unit_price.checked_mul_quantity(2), Some(Money::from_units(10000)));
    /// assert_eq!(Money::from_units(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two values, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display groups thousands with dots, the way receipts print Rupiah.
///
/// ## Note
/// For logs and debugging. Clients format amounts themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp{}", sign, grouped)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
