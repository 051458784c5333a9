//! API configuration module.
//!
//! ## Sources (later wins)
//! ```text
//! built-in defaults
//!   < kasir.toml (optional, working directory)
//!   < PORT                (unprefixed, for PaaS-style deploys)
//!   < KASIR_* environment (KASIR_PORT, KASIR_DATABASE_PATH, ...)
//! ```
//! A `.env` file is loaded into the process environment first when present.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File, Map};
use kasir_db::DbConfig;
use serde::Deserialize;

/// API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind.
    pub host: String,

    /// HTTP port.
    pub port: u16,

    /// SQLite database file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool size.
    pub max_connections: u32,

    /// Connections kept open while idle.
    pub min_connections: u32,

    /// How long a checkout waits for SQLite's write lock.
    pub busy_timeout_secs: u64,

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl ApiConfig {
    /// Loads configuration from `.env`, `kasir.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        let env: Map<String, String> = std::env::vars().collect();
        Self::from_sources(Some("kasir"), env)
    }

    /// Builds configuration from an optional file stem and an explicit
    /// environment map.
    pub fn from_sources(file: Option<&str>, env: Map<String, String>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("database_path", "./kasir.db")?
            .set_default("max_connections", 25_i64)?
            .set_default("min_connections", 1_i64)?
            .set_default("busy_timeout_secs", 5_i64)?
            .set_default("log_level", "info")?;

        if let Some(stem) = file {
            builder = builder.add_source(File::with_name(stem).required(false));
        }

        let compat_port: Map<String, String> = env
            .get("PORT")
            .map(|port| ("PORT".to_string(), port.clone()))
            .into_iter()
            .collect();

        let settings = builder
            .add_source(Environment::default().source(Some(compat_port)))
            .add_source(
                Environment::with_prefix("KASIR")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::InvalidValue("min_connections".to_string()));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }
        Ok(())
    }

    /// Address to bind, `host:port`.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for kasir-db.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
