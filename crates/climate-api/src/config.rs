//! Layered configuration for the query service.
//!
//! Values are resolved in order, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `climate-api.toml` in the working directory, or the file named by
//!    `CLIMATE_API_CONFIG` (optional)
//! 3. Environment variables prefixed `CLIMATE__`, with `__` between
//!    section and key (e.g. `CLIMATE__SERVER__PORT=9000`)

use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat};
use climate_db::SqliteConfig;
use climate_types::DatasetBounds;
use serde::Deserialize;

use crate::server::ServerConfig;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "climate-api.toml";

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "CLIMATE_API_CONFIG";

/// Prefix of environment overrides.
const ENV_PREFIX: &str = "CLIMATE";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    /// The values loaded are inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Data store settings.
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Known first/last dates of the dataset.
    #[serde(default)]
    pub dataset: DatasetBounds,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        let defaults = ServerConfig::default();
        Self {
            host: defaults.host,
            port: defaults.port,
        }
    }
}

/// Data store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// `SQLite` URL of the dataset file.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// Seconds a request waits for a free connection.
    pub acquire_timeout_secs: u64,
    /// Open the file read-only.
    pub read_only: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::from("sqlite://Resources/hawaii.sqlite"),
            max_connections: 5,
            acquire_timeout_secs: 5,
            read_only: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from the default file location and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or the
    /// resulting values are inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_owned());
        Self::load_from(Path::new(&path))
    }

    /// Load configuration from `path` (if it exists) and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or the
    /// resulting values are inconsistent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.earliest > self.dataset.latest {
            return Err(ConfigError::Invalid(format!(
                "dataset.earliest ({}) is after dataset.latest ({})",
                self.dataset.earliest, self.dataset.latest
            )));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(String::from(
                "database.max_connections must be at least 1",
            )));
        }
        Ok(())
    }

    /// Listener configuration for [`start_server`](crate::server::start_server).
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }

    /// Pool configuration for [`ClimatePool::connect`](climate_db::ClimatePool::connect).
    pub fn sqlite_config(&self) -> SqliteConfig {
        SqliteConfig::new(&self.database.url)
            .with_max_connections(self.database.max_connections)
            .with_acquire_timeout(Duration::from_secs(self.database.acquire_timeout_secs))
            .with_read_only(self.database.read_only)
    }
}
