//! # Store Capability Traits
//!
//! The checkout and report flows only ever touch storage through these two
//! traits. kasir-db implements them for SQLite; tests implement them in
//! memory.
//!
//! ## Capability Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesStore (shared handle, cheap to clone in adapters)                │
//! │  ├── begin()                    → CheckoutUnit (one atomic unit)       │
//! │  ├── query_revenue_and_count()  → Sales Report Aggregator              │
//! │  ├── query_top_product()        → Sales Report Aggregator              │
//! │  └── query_report()             → both of the above, one read view     │
//! │                                                                         │
//! │  CheckoutUnit (one open store transaction)                             │
//! │  ├── get_price_and_stock()      → Product Ledger                       │
//! │  ├── decrement_stock()          → id-scoped conditional update         │
//! │  ├── insert_transaction()       → Transaction Store (header)           │
//! │  ├── insert_lines()             → Transaction Store (batched lines)    │
//! │  └── commit()                                                          │
//! │                                                                         │
//! │  Dropping a CheckoutUnit without commit() discards every write.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Futures are declared `Send` so the flows can run on any tokio worker.

use std::future::Future;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{
    BestSeller, PriceAndStock, ProductId, ReportRange, ReportTotals, TransactionHeader,
    TransactionLine,
};

/// One atomic, isolated unit of work against the store.
///
/// Implementations must roll back on drop when `commit` was never reached.
/// That is what makes a cancelled checkout leave no trace.
pub trait CheckoutUnit: Send {
    /// Reads the current name, price and stock of a product, bypassing any
    /// cache. `None` when the id has no row.
    fn get_price_and_stock(
        &mut self,
        product_id: ProductId,
    ) -> impl Future<Output = CoreResult<Option<PriceAndStock>>> + Send;

    /// Applies `stock_quantity = stock_quantity - quantity` scoped by id.
    ///
    /// Returns `false` when no row matched. The update is relative, so two
    /// units decrementing the same product serialize on the store's write
    /// lock and neither decrement is lost.
    fn decrement_stock(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> impl Future<Output = CoreResult<bool>> + Send;

    /// Inserts the transaction header and returns it with its generated id
    /// and the store-assigned `created_at`.
    fn insert_transaction(
        &mut self,
        total_amount: Money,
    ) -> impl Future<Output = CoreResult<TransactionHeader>> + Send;

    /// Inserts all lines in one batch, preserving slice order.
    fn insert_lines(
        &mut self,
        lines: &[TransactionLine],
    ) -> impl Future<Output = CoreResult<()>> + Send;

    /// Makes every write of this unit visible at once.
    fn commit(self) -> impl Future<Output = CoreResult<()>> + Send;
}

/// A handle to the shared store.
pub trait SalesStore: Send + Sync {
    /// The unit of work type this store hands out.
    type Unit: CheckoutUnit;

    /// Opens a new unit of work.
    fn begin(&self) -> impl Future<Output = CoreResult<Self::Unit>> + Send;

    /// Sum of `total_amount` and count of transactions whose `created_at`
    /// lies in `range` (inclusive). `(0, 0)` when none.
    fn query_revenue_and_count(
        &self,
        range: ReportRange,
    ) -> impl Future<Output = CoreResult<(Money, i64)>> + Send;

    /// Product with the largest summed line quantity among transactions in
    /// `range`, ties broken by ascending product id. `None` when no lines.
    fn query_top_product(
        &self,
        range: ReportRange,
    ) -> impl Future<Output = CoreResult<Option<BestSeller>>> + Send;

    /// Runs both report queries against one view of the data, so a checkout
    /// committing in between cannot make the count and the best seller
    /// disagree.
    ///
    /// The default issues the two queries back to back. Stores with read
    /// transactions should override it.
    fn query_report(&self, range: ReportRange) -> impl Future<Output = CoreResult<ReportTotals>> + Send {
        async move {
            let (revenue, transaction_count) = self.query_revenue_and_count(range).await?;
            let top_product = self.query_top_product(range).await?;
            Ok(ReportTotals {
                revenue,
                transaction_count,
                top_product,
            })
        }
    }
}
