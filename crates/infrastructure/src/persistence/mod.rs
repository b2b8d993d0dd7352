//! Persistence module
//!
//! sqlx-backed SQLite storage for stations.

pub mod async_connection;
pub mod database_health;
pub mod error;
pub mod station_store;

pub use async_connection::{AsyncDatabase, AsyncDatabaseConfig, AsyncDatabaseError};
pub use database_health::SqliteDatabaseHealth;
pub use error::map_sqlx_error;
pub use station_store::SqliteStationStore;
