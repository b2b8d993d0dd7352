//! Application services - Use case implementations

mod query_facade;
mod station_service;

pub use query_facade::{QueryDocument, QueryResult, StationQueryFacade, StationSchema};
pub use station_service::{StationService, StationServiceConfig};
