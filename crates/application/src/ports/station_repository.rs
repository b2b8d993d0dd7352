//! Station storage port
//!
//! The repository is the single source of truth for stations. Adapters in the
//! infrastructure layer implement it on top of SQLite; every call maps to one
//! parameterized statement.

use async_trait::async_trait;
use domain::{Station, StationFields, StationId, Window};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for station persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Fetch one station
    ///
    /// Returns `ApplicationError::NotFound` when no row has this id.
    async fn get_by_id(&self, id: StationId) -> Result<Station, ApplicationError>;

    /// Fetch a window of stations in storage order (ascending id)
    async fn get_all(&self, window: &Window) -> Result<Vec<Station>, ApplicationError>;

    /// Fetch every station in storage order
    async fn get_everything(&self) -> Result<Vec<Station>, ApplicationError>;

    /// Insert a station and return it with its assigned id
    async fn create(&self, fields: &StationFields) -> Result<Station, ApplicationError>;

    /// Replace all fields of an existing station
    ///
    /// Returns `ApplicationError::NotFound` when no row has this id.
    async fn update(
        &self,
        id: StationId,
        fields: &StationFields,
    ) -> Result<Station, ApplicationError>;

    /// Remove a station
    ///
    /// Returns `ApplicationError::NotFound` when nothing was deleted.
    async fn delete(&self, id: StationId) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn StationRepository) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn StationRepository>();
    }

    #[tokio::test]
    async fn mock_reports_not_found() {
        let mut mock = MockStationRepository::new();
        mock.expect_get_by_id()
            .returning(|id| Err(ApplicationError::station_not_found(id)));

        let result = mock.get_by_id(StationId::from_raw(4)).await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }
}
