//! Station service
//!
//! Use cases over the station repository: CRUD, windowed listing and
//! proximity listing. Every repository call runs under a storage deadline;
//! a call that outlives it is dropped and reported as cancelled.

use std::{fmt, future::Future, sync::Arc, time::Duration};

use domain::{ListParams, OriginPoint, Station, StationFields, StationId, proximity};
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::StationRepository};

/// Configuration for the station service
#[derive(Debug, Clone)]
pub struct StationServiceConfig {
    /// Deadline applied to each storage call (default: 5s)
    pub storage_timeout: Duration,
}

impl Default for StationServiceConfig {
    fn default() -> Self {
        Self {
            storage_timeout: Duration::from_secs(5),
        }
    }
}

/// Service for managing and querying stations
#[derive(Clone)]
pub struct StationService {
    repository: Arc<dyn StationRepository>,
    config: StationServiceConfig,
}

impl fmt::Debug for StationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StationService {
    /// Create a service with the default storage deadline
    #[must_use]
    pub fn new(repository: Arc<dyn StationRepository>) -> Self {
        Self::with_config(repository, StationServiceConfig::default())
    }

    #[must_use]
    pub fn with_config(repository: Arc<dyn StationRepository>, config: StationServiceConfig) -> Self {
        Self { repository, config }
    }

    async fn with_deadline<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, ApplicationError>>,
    ) -> Result<T, ApplicationError> {
        let timeout = self.config.storage_timeout;
        tokio::time::timeout(timeout, call).await.unwrap_or_else(|_| {
            #[allow(clippy::cast_possible_truncation)]
            let timeout_ms = timeout.as_millis() as u64;
            warn!(operation, timeout_ms, "Storage call exceeded deadline");
            Err(ApplicationError::Cancelled(format!(
                "{operation} did not complete within {timeout_ms} ms"
            )))
        })
    }

    /// Fetch one station
    #[instrument(skip(self))]
    pub async fn get_station(&self, id: StationId) -> Result<Station, ApplicationError> {
        self.with_deadline("get_by_id", self.repository.get_by_id(id))
            .await
    }

    /// List stations in storage order
    #[instrument(skip(self))]
    pub async fn list_stations(&self, params: &ListParams) -> Result<Vec<Station>, ApplicationError> {
        let window = params.window()?;
        let stations = self
            .with_deadline("get_all", self.repository.get_all(&window))
            .await?;

        debug!(count = stations.len(), "Listed stations");
        Ok(stations)
    }

    /// List stations ordered by distance from an origin
    ///
    /// The full station set is loaded and ranked in memory, then windowed.
    #[instrument(skip(self))]
    pub async fn nearby_stations(
        &self,
        origin: &OriginPoint,
    ) -> Result<Vec<Station>, ApplicationError> {
        let window = origin.window()?;
        let location = origin.location()?;

        let candidates = self
            .with_deadline("get_everything", self.repository.get_everything())
            .await?;
        let total = candidates.len();
        let stations = proximity::nearest(&location, &window, candidates);

        debug!(%location, total, returned = stations.len(), "Ranked stations by distance");
        Ok(stations)
    }

    /// Create a station
    #[instrument(skip(self, fields))]
    pub async fn create_station(&self, fields: StationFields) -> Result<Station, ApplicationError> {
        fields.validate()?;

        let station = self
            .with_deadline("create", self.repository.create(&fields))
            .await?;

        info!(id = %station.id, name = %station.name, "Station created");
        Ok(station)
    }

    /// Replace every field of an existing station
    #[instrument(skip(self, fields))]
    pub async fn update_station(
        &self,
        id: StationId,
        fields: StationFields,
    ) -> Result<Station, ApplicationError> {
        fields.validate()?;

        let station = self
            .with_deadline("update", self.repository.update(id, &fields))
            .await?;

        info!(%id, "Station updated");
        Ok(station)
    }

    /// Delete a station
    #[instrument(skip(self))]
    pub async fn delete_station(&self, id: StationId) -> Result<(), ApplicationError> {
        self.with_deadline("delete", self.repository.delete(id))
            .await?;

        info!(%id, "Station deleted");
        Ok(())
    }
}
