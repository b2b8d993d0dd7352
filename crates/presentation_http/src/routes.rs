//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Stations (v1)
        .route(
            "/v1/stations",
            get(handlers::stations::list_stations).post(handlers::stations::create_station),
        )
        .route("/v1/stations/nearby", get(handlers::stations::nearby_stations))
        .route(
            "/v1/stations/{id}",
            get(handlers::stations::get_station)
                .put(handlers::stations::update_station)
                .delete(handlers::stations::delete_station),
        )
        // Ad-hoc queries over a resolved station set
        .route("/v1/stations/query", post(handlers::query::query_stations))
        .route(
            "/v1/stations/nearby/query",
            post(handlers::query::query_nearby_stations),
        )
        .layer(RequestIdLayer::new())
        .with_state(state)
}
