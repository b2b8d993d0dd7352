//! Domain entities

pub mod station;

pub use station::{MAX_TEXT_LEN, Station, StationFields};
