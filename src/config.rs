//! Layered configuration for the catalog service
//!
//! Sources, lowest precedence first: built-in defaults, an optional config
//! file (`configs/config.yml` unless `LIBRARY_CONFIG` names another),
//! `LIBRARY__SECTION__KEY` environment variables, then `DATABASE_URL`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "configs/config";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on draining in-flight requests after a shutdown signal
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Location of the user-identity service answering permission checks
#[derive(Debug, Deserialize, Clone)]
pub struct UserServiceConfig {
    pub host: String,
    pub internal_port: u16,
    /// Per-request timeout; a hung user service counts as unavailable
    pub timeout_ms: u64,
}

impl UserServiceConfig {
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host, self.internal_port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is not set
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub user_service: UserServiceConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the default file location and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("LIBRARY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load_from(&path)
    }

    /// Load configuration using `path` as the (optional) config file
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.shutdown_timeout_secs", 5)?
            .set_default("user_service.host", "localhost")?
            .set_default("user_service.internal_port", 8081)?
            .set_default("user_service.timeout_ms", 3000)?
            .set_default("database.max_connections", 5)?
            .set_default("storage.backend", "memory")?
            .set_default("logging.level", "library_catalog=debug,tower_http=debug")?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}
