//! Database health check port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Snapshot of database health
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Engine version, when the probe could read it
    pub version: Option<String>,
    /// Open connections in the pool
    pub pool_size: Option<u32>,
    pub response_time_ms: Option<u64>,
}

impl DatabaseHealth {
    #[must_use]
    pub fn reachable(version: Option<String>) -> Self {
        Self {
            reachable: true,
            version,
            pool_size: None,
            response_time_ms: None,
        }
    }

    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            version: None,
            pool_size: None,
            response_time_ms: None,
        }
    }

    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    #[must_use]
    pub const fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = Some(size);
        self
    }
}

/// Port used by the readiness probe
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Probe with version and pool details
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
