//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of SQLite and provides
//! configuration loading and logging setup.

pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, DatabaseConfig, Environment, ServerConfig, StorageConfig};
pub use persistence::{
    AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError, SqliteDatabaseHealth,
    SqliteStationStore,
};
pub use telemetry::{LogFormat, TelemetryError, init_logging};
