//! # Database Errors
//!
//! `DbError` is what repositories return. Once it crosses into a checkout
//! or report it collapses to `CoreError::Storage`; the API layer maps the
//! remaining variants to status codes (`NotFound` → 404, constraint
//! violations → 400, everything else → 500).

use kasir_core::CoreError;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// No row for the id, or an update/delete touched zero rows.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// e.g. a transaction line pointing at a missing header.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK, NOT NULL or UNIQUE failure, e.g. a negative `unit_price`.
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Could not open the file, or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed (begin / commit).
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// No pooled connection became free within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Returns true for the NotFound variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

/// Constraint failures are classified by SQLite's extended result code
/// (`ErrorKind`), not by message text.
///
/// ```text
/// RowNotFound                         → NotFound
/// Database, ForeignKeyViolation       → ForeignKeyViolation
/// Database, Check / NotNull / Unique  → ConstraintViolation
/// Database, anything else             → QueryFailed
/// PoolTimedOut                        → PoolExhausted
/// PoolClosed                          → ConnectionFailed
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { message },
                    ErrorKind::CheckViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::UniqueViolation => {
                        DbError::ConstraintViolation { message }
                    }
                    _ => DbError::QueryFailed(message),
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Inside the checkout and report flows every database failure is a
/// storage failure; the caller never retries.
impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        CoreError::Storage(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
