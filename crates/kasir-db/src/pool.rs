//! # Pool and Store Handle
//!
//! Opens the SQLite file (or an in-memory database), applies the pragmas
//! checkout depends on and hands out repositories and the [`SqliteStore`].
//!
//! ## Lock Behaviour Under Load
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request task           pooled connection        SQLite file (WAL)     │
//! │  ─────────────          ─────────────────        ─────────────────     │
//! │  checkout #1  ────────► conn A  UPDATE ... ────► write lock taken      │
//! │  checkout #2  ────────► conn B  UPDATE ... ────► SQLITE_BUSY, retried  │
//! │                                                  for busy_timeout      │
//! │  sales report ────────► conn C  SELECT ... ────► last committed data   │
//! │                                                                         │
//! │  conn A COMMIT ──► conn B acquires the lock and sees the new stock     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `busy_timeout` shorter than the slowest checkout turns contention into
//! `StorageFailure` instead of a queue.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::category::CategoryRepository;
use crate::repository::product::ProductRepository;
use crate::repository::transaction::TransactionRepository;
use crate::store::SqliteStore;

const IN_MEMORY: &str = ":memory:";

/// Where the database lives and how the pool around it is sized.
///
/// ```rust,ignore
/// let config = DbConfig::new("./kasir.db")
///     .max_connections(25)
///     .busy_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Wait for a free pooled connection.
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    /// Wait on SQLite's write lock before SQLITE_BUSY.
    pub busy_timeout: Duration,
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed config: 25 connections, 5s busy timeout, migrations on.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 25,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Private in-memory database for tests.
    ///
    /// Every SQLite connection to `:memory:` gets its own empty database, so
    /// the pool is pinned to one connection that is never reaped.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::MAX,
            ..DbConfig::new(IN_MEMORY)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        Ok(options
            .synchronous(SqliteSynchronous::Normal)
            // off by default in SQLite
            .foreign_keys(true)
            .busy_timeout(self.busy_timeout))
    }
}

/// Shared handle over the pool. Clones share connections.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening database");

        let options = config.connect_options()?;
        debug!(
            busy_timeout_ms = config.busy_timeout.as_millis() as u64,
            in_memory = config.is_in_memory(),
            "SQLite options ready"
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout((!config.is_in_memory()).then_some(config.idle_timeout))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connection pool open"
        );

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.pool.clone())
    }

    /// Store for `kasir_core::checkout` and `kasir_core::get_sales_report`.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::new(self.pool.clone())
    }

    /// Waits for checked-out connections to return, then closes them all.
    /// Later queries fail with `PoolClosed`.
    pub async fn close(&self) {
        info!("Closing connection pool");
        self.pool.close().await;
    }

    /// True when a trivial query round-trips.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
