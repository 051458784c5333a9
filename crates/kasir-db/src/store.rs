//! # SQLite Sales Store
//!
//! Implements the kasir-core store traits on top of the connection pool.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteStore::begin()  →  SqliteUnit { sqlx::Transaction }             │
//! │                                                                         │
//! │  BEGIN (deferred)                                                      │
//! │    UPDATE products SET stock_quantity = stock_quantity - ?  ← write    │
//! │    SELECT name, unit_price, stock_quantity FROM products               │
//! │    ... per line ...                                                    │
//! │    INSERT INTO transactions                                            │
//! │    INSERT INTO transaction_details VALUES (..), (..), (..)             │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Drop without COMMIT → sqlx issues ROLLBACK                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first statement is a write, so the unit takes SQLite's write lock
//! before it reads anything. A second checkout waits in the busy handler
//! (`busy_timeout`) and then sees the committed stock.

use kasir_core::{
    BestSeller, CheckoutUnit, CoreResult, Money, PriceAndStock, ProductId, ReportRange,
    ReportTotals, SalesStore, TransactionHeader, TransactionLine,
};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbError;
use crate::repository::now_utc;

/// Store handle handed to the checkout engine and report aggregator.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }
}

/// One open SQLite transaction.
pub struct SqliteUnit {
    tx: sqlx::Transaction<'static, Sqlite>,
}

impl CheckoutUnit for SqliteUnit {
    async fn get_price_and_stock(&mut self, product_id: ProductId) -> CoreResult<Option<PriceAndStock>> {
        let product = sqlx::query_as::<_, PriceAndStock>(
            "SELECT name, unit_price, stock_quantity FROM products WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(DbError::from)?;

        Ok(product)
    }

    async fn decrement_stock(&mut self, product_id: ProductId, quantity: i64) -> CoreResult<bool> {
        debug!(product_id, quantity, "Decrementing stock");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock_quantity = stock_quantity - ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(now_utc())
        .execute(&mut *self.tx)
        .await
        .map_err(DbError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_transaction(&mut self, total_amount: Money) -> CoreResult<TransactionHeader> {
        let created_at = now_utc();

        let id = sqlx::query("INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2)")
            .bind(total_amount.units())
            .bind(created_at)
            .execute(&mut *self.tx)
            .await
            .map_err(DbError::from)?
            .last_insert_rowid();

        debug!(id, total = %total_amount, "Inserted transaction header");

        Ok(TransactionHeader {
            id,
            total_amount: total_amount.units(),
            created_at,
        })
    }

    async fn insert_lines(&mut self, lines: &[TransactionLine]) -> CoreResult<()> {
        if lines.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO transaction_details (transaction_id, product_id, product_name, quantity, subtotal) ",
        );

        builder.push_values(lines, |mut row, line| {
            row.push_bind(line.transaction_id)
                .push_bind(line.product_id)
                .push_bind(line.product_name.clone())
                .push_bind(line.quantity)
                .push_bind(line.subtotal);
        });

        builder
            .build()
            .execute(&mut *self.tx)
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn commit(self) -> CoreResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        Ok(())
    }
}

impl SalesStore for SqliteStore {
    type Unit = SqliteUnit;

    async fn begin(&self) -> CoreResult<SqliteUnit> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(SqliteUnit { tx })
    }

    async fn query_revenue_and_count(&self, range: ReportRange) -> CoreResult<(Money, i64)> {
        Ok(revenue_and_count(&self.pool, range).await.map_err(DbError::from)?)
    }

    async fn query_top_product(&self, range: ReportRange) -> CoreResult<Option<BestSeller>> {
        Ok(top_product(&self.pool, range).await.map_err(DbError::from)?)
    }

    /// Both aggregates inside one deferred transaction. Under WAL the first
    /// SELECT pins a read snapshot that later commits do not disturb.
    async fn query_report(&self, range: ReportRange) -> CoreResult<ReportTotals> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let (revenue, transaction_count) = revenue_and_count(&mut *tx, range)
            .await
            .map_err(DbError::from)?;
        let top_product = top_product(&mut *tx, range).await.map_err(DbError::from)?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(ReportTotals {
            revenue,
            transaction_count,
            top_product,
        })
    }
}

async fn revenue_and_count<'e, E>(executor: E, range: ReportRange) -> Result<(Money, i64), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (revenue, count): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
        FROM transactions
        WHERE created_at >= ?1 AND created_at <= ?2
        "#,
    )
    .bind(range.start)
    .bind(range.end)
    .fetch_one(executor)
    .await?;

    Ok((Money::from_units(revenue), count))
}

async fn top_product<'e, E>(executor: E, range: ReportRange) -> Result<Option<BestSeller>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    // Current product name, falling back to the line snapshot when the
    // product row is gone.
    sqlx::query_as::<_, BestSeller>(
        r#"
        SELECT
            COALESCE(MAX(p.name), MAX(td.product_name)) AS name,
            SUM(td.quantity) AS quantity_sold
        FROM transaction_details td
        JOIN transactions t ON t.id = td.transaction_id
        LEFT JOIN products p ON p.id = td.product_id
        WHERE t.created_at >= ?1 AND t.created_at <= ?2
        GROUP BY td.product_id
        ORDER BY quantity_sold DESC, td.product_id ASC
        LIMIT 1
        "#,
    )
    .bind(range.start)
    .bind(range.end)
    .fetch_optional(executor)
    .await
}
