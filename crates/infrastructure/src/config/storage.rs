//! Storage call deadline configuration.

use std::time::Duration;

use application::StationServiceConfig;
use serde::{Deserialize, Serialize};

/// Limits applied to every repository call made by the station service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Deadline for a single storage call in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    5000
}

impl StorageConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl From<&StorageConfig> for StationServiceConfig {
    fn from(config: &StorageConfig) -> Self {
        Self {
            storage_timeout: config.timeout(),
        }
    }
}
