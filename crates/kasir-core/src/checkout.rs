//! # Checkout Engine
//!
//! Turns a cart into a persisted [`Transaction`] as one atomic unit.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout (one unit of work)                       │
//! │                                                                         │
//! │  validate_cart()  ── empty / qty <= 0 ──► ValidationFailure            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.begin()                                                         │
//! │       │                                                                 │
//! │       ▼  for each line, in cart order                                  │
//! │  decrement_stock(id, qty)   ── no row ──► ProductNotFound (rollback)   │
//! │  get_price_and_stock(id)                                               │
//! │  subtotal = unit_price × qty, total += subtotal                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert_transaction(total)  → id, created_at                           │
//! │  insert_lines(lines)        (one batch, cart order)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commit()                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Statement Order
//! The stock update for a line runs before the line's price read. The first
//! statement of the unit is therefore a write, which makes the store take its
//! write lock up front; a competing checkout waits for it instead of racing
//! on a stale read. The price read sees this unit's own decrement, which does
//! not affect the name or unit price it returns.
//!
//! ## Stock Policy
//! No `stock_quantity >= 0` guard is applied, so overselling drives stock
//! negative instead of failing the checkout.

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::store::{CheckoutUnit, SalesStore};
use crate::types::{CartLine, PriceAndStock, Transaction, TransactionLine};
use crate::validation::validate_cart;

/// Runs a checkout for `cart` against `store`.
///
/// ## Returns
/// * `Ok(Transaction)` - header id, total and lines in cart order
/// * `Err(CoreError::Validation)` - bad cart shape or amount overflow
/// * `Err(CoreError::ProductNotFound)` - a line names an unknown product
/// * `Err(CoreError::Storage)` - the store failed
///
/// Every error leaves the store untouched: the unit is dropped before
/// commit and rolls back. The same holds if this future is dropped midway.
pub async fn checkout<S: SalesStore>(store: &S, cart: &[CartLine]) -> CoreResult<Transaction> {
    validate_cart(cart)?;

    debug!(lines = cart.len(), "Starting checkout");

    let mut unit = store.begin().await?;

    let mut lines = Vec::with_capacity(cart.len());
    let mut total = Money::zero();

    for cart_line in cart {
        let line = price_line(&mut unit, cart_line).await?;
        total = total
            .checked_add(line.subtotal())
            .ok_or_else(|| ValidationError::Overflow {
                field: "total_amount".to_string(),
            })?;
        lines.push(line);
    }

    let header = unit.insert_transaction(total).await?;

    for line in &mut lines {
        line.transaction_id = header.id;
    }
    unit.insert_lines(&lines).await?;

    unit.commit().await?;

    info!(
        transaction_id = header.id,
        total = %total,
        lines = lines.len(),
        "Checkout committed"
    );

    Ok(header.with_lines(lines))
}

/// Decrements stock for one cart line and prices it.
async fn price_line<U: CheckoutUnit>(unit: &mut U, cart_line: &CartLine) -> CoreResult<TransactionLine> {
    let product_id = cart_line.product_id;

    if !unit.decrement_stock(product_id, cart_line.quantity).await? {
        warn!(product_id, "Checkout rejected: product not found");
        return Err(CoreError::ProductNotFound(product_id));
    }

    let product = unit
        .get_price_and_stock(product_id)
        .await?
        .ok_or(CoreError::ProductNotFound(product_id))?;

    if product.stock_quantity < 0 {
        debug!(product_id, stock = product.stock_quantity, "Stock went negative");
    }

    build_line(cart_line, product)
}

/// Builds the snapshot line for a cart line from the ledger's answer.
///
/// `transaction_id` stays zero until the header exists.
pub fn build_line(cart_line: &CartLine, product: PriceAndStock) -> CoreResult<TransactionLine> {
    let subtotal = product
        .price()
        .checked_mul_quantity(cart_line.quantity)
        .ok_or_else(|| ValidationError::Overflow {
            field: "subtotal".to_string(),
        })?;

    Ok(TransactionLine {
        transaction_id: 0,
        product_id: cart_line.product_id,
        product_name: product.name,
        quantity: cart_line.quantity,
        subtotal: subtotal.units(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
