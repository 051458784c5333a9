//! # Transaction Repository
//!
//! Lookup and removal of completed checkouts. Transactions are created only
//! by the checkout engine through [`crate::store::SqliteStore`].
//!
//! ## Delete Is Atomic
//! ```text
//! BEGIN
//!   DELETE FROM transaction_details WHERE transaction_id = ?
//!   DELETE FROM transactions        WHERE id = ?   ── 0 rows ──► NotFound (rollback)
//! COMMIT
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kasir_core::{Transaction, TransactionHeader, TransactionId, TransactionLine};

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Gets a transaction with its lines in cart order.
    pub async fn get_by_id(&self, id: TransactionId) -> DbResult<Option<Transaction>> {
        let header = sqlx::query_as::<_, TransactionHeader>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let lines = self.get_lines(id).await?;

        Ok(Some(header.with_lines(lines)))
    }

    /// Gets the lines of a transaction. Line ids follow insertion order,
    /// which is cart order.
    pub async fn get_lines(&self, transaction_id: TransactionId) -> DbResult<Vec<TransactionLine>> {
        let lines = sqlx::query_as::<_, TransactionLine>(
            r#"
            SELECT transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Deletes a transaction and all of its lines in one unit of work.
    ///
    /// Stock is not restored.
    pub async fn delete(&self, id: TransactionId) -> DbResult<()> {
        debug!(id, "Deleting transaction");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let lines = sqlx::query("DELETE FROM transaction_details WHERE transaction_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let headers = sqlx::query("DELETE FROM transactions WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if headers == 0 {
            // tx dropped here, nothing is deleted
            return Err(DbError::not_found("Transaction", id));
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id, lines, "Transaction deleted");
        Ok(())
    }

    /// Counts all transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
