//! Value objects

pub mod geo_location;
pub mod station_id;

pub use geo_location::{EARTH_RADIUS_KM, GeoLocation};
pub use station_id::StationId;
