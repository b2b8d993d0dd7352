//! Station CRUD and listing handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::{ListParams, OriginPoint, Station, StationFields, StationId};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ApiQuery, ValidatedJson},
    state::AppState,
};

/// Request body for creating or replacing a station
#[derive(Debug, Deserialize, Validate)]
pub struct StationRequest {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub provider: String,
}

impl From<StationRequest> for StationFields {
    fn from(req: StationRequest) -> Self {
        Self::new(req.name, req.lat, req.lng, req.provider)
    }
}

/// Parse a `{id}` path segment
pub(crate) fn parse_id(raw: &str) -> Result<StationId, ApiError> {
    raw.parse::<StationId>().map_err(ApiError::from)
}

/// GET /v1/stations/{id}
#[instrument(skip(state))]
pub async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Station>, ApiError> {
    let id = parse_id(&id)?;
    let station = state.station_service.get_station(id).await?;
    Ok(Json(station))
}

/// GET /v1/stations?offset&limit
#[instrument(skip(state))]
pub async fn list_stations(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<Station>>, ApiError> {
    let stations = state.station_service.list_stations(&params).await?;
    Ok(Json(stations))
}

/// GET /v1/stations/nearby?lat&lng&offset&limit
#[instrument(skip(state))]
pub async fn nearby_stations(
    State(state): State<AppState>,
    ApiQuery(origin): ApiQuery<OriginPoint>,
) -> Result<Json<Vec<Station>>, ApiError> {
    let stations = state.station_service.nearby_stations(&origin).await?;
    Ok(Json(stations))
}

/// POST /v1/stations
#[instrument(skip(state, request))]
pub async fn create_station(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<StationRequest>,
) -> Result<(StatusCode, Json<Station>), ApiError> {
    let station = state.station_service.create_station(request.into()).await?;
    Ok((StatusCode::CREATED, Json(station)))
}

/// PUT /v1/stations/{id}
///
/// Replaces every field and answers 201 with the stored station.
#[instrument(skip(state, request))]
pub async fn update_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<StationRequest>,
) -> Result<(StatusCode, Json<Station>), ApiError> {
    let id = parse_id(&id)?;
    let station = state
        .station_service
        .update_station(id, request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(station)))
}

/// DELETE /v1/stations/{id}
#[instrument(skip(state))]
pub async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.station_service.delete_station(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
