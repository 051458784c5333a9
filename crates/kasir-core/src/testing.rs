//! In-memory store used by the engine and report tests.
//!
//! A unit holds the store lock for its whole life and works on a copy of the
//! state, which is swapped in on commit. Dropping the unit discards the copy.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::store::{CheckoutUnit, SalesStore};
use crate::types::{
    BestSeller, PriceAndStock, ProductId, ReportRange, TransactionHeader, TransactionLine,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    products: BTreeMap<ProductId, PriceAndStock>,
    transactions: Vec<TransactionHeader>,
    lines: Vec<TransactionLine>,
    next_transaction_id: i64,
    clock: Option<DateTime<Utc>>,
}

pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    fail_line_inserts: bool,
    begins: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            state: Arc::new(Mutex::new(MemoryState::default())),
            fail_line_inserts: false,
            begins: AtomicUsize::new(0),
        }
    }

    pub fn failing_line_inserts(mut self) -> Self {
        self.fail_line_inserts = true;
        self
    }

    pub async fn add_product(&self, id: ProductId, name: &str, unit_price: i64, stock: i64) {
        self.state.lock().await.products.insert(
            id,
            PriceAndStock {
                name: name.to_string(),
                unit_price,
                stock_quantity: stock,
            },
        );
    }

    pub async fn rename_product(&self, id: ProductId, name: &str) {
        if let Some(product) = self.state.lock().await.products.get_mut(&id) {
            product.name = name.to_string();
        }
    }

    pub async fn remove_product(&self, id: ProductId) {
        self.state.lock().await.products.remove(&id);
    }

    /// Pins the timestamp given to the next transactions.
    pub async fn set_clock(&self, at: DateTime<Utc>) {
        self.state.lock().await.clock = Some(at);
    }

    pub async fn stock_of(&self, id: ProductId) -> Option<i64> {
        self.state
            .lock()
            .await
            .products
            .get(&id)
            .map(|p| p.stock_quantity)
    }

    pub async fn transaction_count(&self) -> usize {
        self.state.lock().await.transactions.len()
    }

    pub async fn lines_of(&self, transaction_id: i64) -> Vec<TransactionLine> {
        self.state
            .lock()
            .await
            .lines
            .iter()
            .filter(|l| l.transaction_id == transaction_id)
            .cloned()
            .collect()
    }

    pub fn begin_count(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }
}

pub struct MemoryUnit {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    fail_line_inserts: bool,
}

impl CheckoutUnit for MemoryUnit {
    async fn get_price_and_stock(&mut self, product_id: ProductId) -> CoreResult<Option<PriceAndStock>> {
        Ok(self.working.products.get(&product_id).cloned())
    }

    async fn decrement_stock(&mut self, product_id: ProductId, quantity: i64) -> CoreResult<bool> {
        match self.working.products.get_mut(&product_id) {
            Some(product) => {
                product.stock_quantity -= quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_transaction(&mut self, total_amount: Money) -> CoreResult<TransactionHeader> {
        self.working.next_transaction_id += 1;
        let created_at = self
            .working
            .clock
            .unwrap_or_else(|| Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap());

        let header = TransactionHeader {
            id: self.working.next_transaction_id,
            total_amount: total_amount.units(),
            created_at,
        };
        self.working.transactions.push(header.clone());
        Ok(header)
    }

    async fn insert_lines(&mut self, lines: &[TransactionLine]) -> CoreResult<()> {
        if self.fail_line_inserts {
            return Err(CoreError::storage("disk I/O error"));
        }
        self.working.lines.extend_from_slice(lines);
        Ok(())
    }

    async fn commit(mut self) -> CoreResult<()> {
        *self.guard = self.working;
        Ok(())
    }
}

impl SalesStore for MemoryStore {
    type Unit = MemoryUnit;

    async fn begin(&self) -> CoreResult<MemoryUnit> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(MemoryUnit {
            guard,
            working,
            fail_line_inserts: self.fail_line_inserts,
        })
    }

    async fn query_revenue_and_count(&self, range: ReportRange) -> CoreResult<(Money, i64)> {
        let state = self.state.lock().await;
        let in_range: Vec<_> = state
            .transactions
            .iter()
            .filter(|t| range.contains(t.created_at))
            .collect();

        let revenue = Money::from_units(in_range.iter().map(|t| t.total_amount).sum());
        Ok((revenue, in_range.len() as i64))
    }

    async fn query_top_product(&self, range: ReportRange) -> CoreResult<Option<BestSeller>> {
        let state = self.state.lock().await;

        // product_id -> (quantity, name snapshot)
        let mut totals: BTreeMap<ProductId, (i64, String)> = BTreeMap::new();
        for txn in state.transactions.iter().filter(|t| range.contains(t.created_at)) {
            for line in state.lines.iter().filter(|l| l.transaction_id == txn.id) {
                let entry = totals
                    .entry(line.product_id)
                    .or_insert((0, line.product_name.clone()));
                entry.0 += line.quantity;
            }
        }

        // BTreeMap iterates ascending ids, so the first maximum wins ties.
        let top = totals
            .into_iter()
            .fold(None::<(ProductId, i64, String)>, |best, (id, (qty, name))| match best {
                Some(b) if b.1 >= qty => Some(b),
                _ => Some((id, qty, name)),
            });

        Ok(top.map(|(id, qty, snapshot)| BestSeller {
            name: state
                .products
                .get(&id)
                .map(|p| p.name.clone())
                .unwrap_or(snapshot),
            quantity_sold: qty,
        }))
    }
}
