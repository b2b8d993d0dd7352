//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::{DatabaseHealthPort, StationService};

/// Shared application state
///
/// Built once at startup; handlers receive clones.
#[derive(Clone)]
pub struct AppState {
    pub station_service: Arc<StationService>,
    /// Probe used by the readiness endpoint
    pub database_health: Arc<dyn DatabaseHealthPort>,
}

impl AppState {
    #[must_use]
    pub fn new(
        station_service: Arc<StationService>,
        database_health: Arc<dyn DatabaseHealthPort>,
    ) -> Self {
        Self {
            station_service,
            database_health,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("station_service", &self.station_service)
            .finish_non_exhaustive()
    }
}
