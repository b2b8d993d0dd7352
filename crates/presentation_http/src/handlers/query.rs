//! Ad-hoc query handlers
//!
//! Both endpoints resolve their station set first (plain window or ranked
//! window) and then run the caller's query document over exactly that set.

use application::{QueryDocument, QueryResult, StationQueryFacade};
use axum::{Json, extract::State};
use domain::{ListParams, OriginPoint};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ApiQuery, ValidatedJson},
    state::AppState,
};

/// Request body carrying a query document
#[derive(Debug, Deserialize, Validate)]
pub struct QueryRequest {
    #[validate(length(min = 1, max = 16384, message = "must be between 1 and 16384 characters"))]
    pub query: String,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
}

impl From<QueryRequest> for QueryDocument {
    fn from(req: QueryRequest) -> Self {
        Self {
            query: req.query,
            operation: req.operation,
            variables: req.variables,
        }
    }
}

/// POST /v1/stations/query?offset&limit
#[instrument(skip(state, request))]
pub async fn query_stations(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
    ValidatedJson(request): ValidatedJson<QueryRequest>,
) -> Result<Json<QueryResult>, ApiError> {
    let stations = state.station_service.list_stations(&params).await?;
    let result = StationQueryFacade::run(stations, request.into()).await?;
    Ok(Json(result))
}

/// POST /v1/stations/nearby/query?lat&lng&offset&limit
#[instrument(skip(state, request))]
pub async fn query_nearby_stations(
    State(state): State<AppState>,
    ApiQuery(origin): ApiQuery<OriginPoint>,
    ValidatedJson(request): ValidatedJson<QueryRequest>,
) -> Result<Json<QueryResult>, ApiError> {
    let stations = state.station_service.nearby_stations(&origin).await?;
    let result = StationQueryFacade::run(stations, request.into()).await?;
    Ok(Json(result))
}
