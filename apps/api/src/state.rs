//! # Application State
//!
//! Shared state handed to every axum handler.
//!
//! ## Thread Safety
//! `Database` wraps a `SqlitePool`, which is already `Send + Sync` and cheap
//! to clone. Handlers run concurrently without any explicit locking; checkout
//! isolation comes from SQLite transactions.

use kasir_db::{Database, SqliteStore};

/// State shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Database,
}

impl AppState {
    /// Creates the state around an open database.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }

    /// Returns the database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Returns the store checkout and reports run on.
    pub fn store(&self) -> SqliteStore {
        self.db.store()
    }
}
