//! SQLite adapter for the StationRepository port

use application::{error::ApplicationError, ports::StationRepository};
use async_trait::async_trait;
use domain::{Station, StationFields, StationId, Window};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::map_sqlx_error;

const STATION_COLUMNS: &str = "station_id, name, lat, lng, provider";

/// SQLite implementation of the station repository
#[derive(Debug, Clone)]
pub struct SqliteStationStore {
    pool: SqlitePool,
}

impl SqliteStationStore {
    /// Create a new store over an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StationRepository for SqliteStationStore {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: StationId) -> Result<Station, ApplicationError> {
        let row: Option<StationRow> = sqlx::query_as(&format!(
            "SELECT {STATION_COLUMNS} FROM stations WHERE station_id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Station::from)
            .ok_or_else(|| ApplicationError::station_not_found(id))
    }

    #[instrument(skip(self))]
    async fn get_all(&self, window: &Window) -> Result<Vec<Station>, ApplicationError> {
        let rows: Vec<StationRow> = sqlx::query_as(&format!(
            "SELECT {STATION_COLUMNS} FROM stations ORDER BY station_id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(window.limit()))
        // SQLite offsets are signed 64-bit
        .bind(i64::try_from(window.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(count = rows.len(), "Fetched station window");
        Ok(rows.into_iter().map(Station::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_everything(&self) -> Result<Vec<Station>, ApplicationError> {
        let rows: Vec<StationRow> = sqlx::query_as(&format!(
            "SELECT {STATION_COLUMNS} FROM stations ORDER BY station_id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(count = rows.len(), "Fetched all stations");
        Ok(rows.into_iter().map(Station::from).collect())
    }

    #[instrument(skip(self, fields))]
    async fn create(&self, fields: &StationFields) -> Result<Station, ApplicationError> {
        let row: StationRow = sqlx::query_as(&format!(
            "INSERT INTO stations (name, lat, lng, provider)
             VALUES ($1, $2, $3, $4)
             RETURNING {STATION_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(&fields.provider)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        id: StationId,
        fields: &StationFields,
    ) -> Result<Station, ApplicationError> {
        let row: Option<StationRow> = sqlx::query_as(&format!(
            "UPDATE stations
             SET name = $1, lat = $2, lng = $3, provider = $4
             WHERE station_id = $5
             RETURNING {STATION_COLUMNS}"
        ))
        .bind(&fields.name)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(&fields.provider)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Station::from)
            .ok_or_else(|| ApplicationError::station_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StationId) -> Result<(), ApplicationError> {
        let result = sqlx::query("DELETE FROM stations WHERE station_id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::station_not_found(id));
        }
        Ok(())
    }
}

/// Row type for station queries
#[derive(sqlx::FromRow)]
struct StationRow {
    station_id: i64,
    name: String,
    lat: f64,
    lng: f64,
    provider: String,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Self {
            id: StationId::from_raw(row.station_id),
            name: row.name,
            latitude: row.lat,
            longitude: row.lng,
            provider: row.provider,
        }
    }
}
