//! Ports implemented by infrastructure adapters

pub mod database_health_port;
pub mod station_repository;

pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
pub use station_repository::StationRepository;

#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
#[cfg(test)]
pub use station_repository::MockStationRepository;
