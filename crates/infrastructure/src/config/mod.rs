//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml` in the working directory, then environment variables such as
//! `STATION_SERVICE__SERVER__PORT=9000`.
//!
//! - `server`: HTTP listener, CORS, logging
//! - `database`: SQLite pool and migrations
//! - `storage`: per-call storage deadline

mod database;
mod server;
mod storage;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "STATION_SERVICE";

/// Application environment (development or production)
///
/// Production hides internal error details from API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a source cannot be parsed or the merged
    /// result fails validation
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, applying defaults for missing keys
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the text is not valid TOML or fails validation
    pub fn from_toml(content: &str) -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would leave the service unusable
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the offending key
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.database.max_connections == 0 {
            return Err(config::ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if let Some(origin) = self
            .server
            .allowed_origins
            .iter()
            .find(|origin| !server::is_valid_origin(origin))
        {
            return Err(config::ConfigError::Message(format!(
                "server.allowed_origins: invalid origin '{origin}'"
            )));
        }
        if self.storage.timeout_ms == 0 {
            return Err(config::ConfigError::Message(
                "storage.timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}
