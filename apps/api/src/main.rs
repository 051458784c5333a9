//! # Kasir API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiConfig::load()  (.env, kasir.toml, KASIR_* / PORT)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tracing subscriber (RUST_LOG, else config log_level)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new()  (pool + migrations)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum::serve(...).with_graceful_shutdown(ctrl-c / SIGTERM)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::close()                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use kasir_api::{router, ApiConfig, AppState};
use kasir_db::Database;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Kasir API server...");
    info!(
        addr = %config.socket_addr(),
        database = %config.database_path.display(),
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config())
        .await
        .context("Failed to open database")?;

    let app = router(AppState::new(db.clone()));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(%addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
