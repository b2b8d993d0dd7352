//! Distance ranking of stations around an origin point

use serde::Deserialize;

use crate::{
    entities::Station,
    errors::DomainError,
    pagination::Window,
    value_objects::GeoLocation,
};

/// Proximity search parameters: origin plus result window
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OriginPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub offset: u64,
    pub limit: u32,
}

impl OriginPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64, offset: u64, limit: u32) -> Self {
        Self {
            lat,
            lng,
            offset,
            limit,
        }
    }

    /// Validated origin location
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` for non-finite or
    /// out-of-range values
    pub fn location(&self) -> Result<GeoLocation, DomainError> {
        GeoLocation::new(self.lat, self.lng)
    }

    /// Validated result window
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPagination` if the limit is out of bounds
    pub fn window(&self) -> Result<Window, DomainError> {
        Window::new(self.offset, self.limit)
    }
}

/// A station together with its distance from the origin
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: Station,
    pub distance_km: f64,
}

/// Order stations by distance from `origin`, nearest first
///
/// The sort is stable; stations at equal distance are ordered by id.
#[must_use]
pub fn rank_by_distance(origin: &GeoLocation, stations: Vec<Station>) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = stations
        .into_iter()
        .map(|station| RankedStation {
            distance_km: origin.distance_km(&station.location()),
            station,
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.station.id.cmp(&b.station.id))
    });
    ranked
}

/// Rank `stations` around `origin` and keep the requested window
#[must_use]
pub fn nearest(origin: &GeoLocation, window: &Window, stations: Vec<Station>) -> Vec<Station> {
    window.apply(
        rank_by_distance(origin, stations)
            .into_iter()
            .map(|ranked| ranked.station),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::StationFields, value_objects::StationId};

    fn station(id: i64, lat: f64, lng: f64) -> Station {
        Station::new(
            StationId::from_raw(id),
            StationFields::new(format!("S{id}"), lat, lng, "P"),
        )
    }

    fn ids(stations: &[Station]) -> Vec<i64> {
        stations.iter().map(|s| s.id.as_i64()).collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let origin = GeoLocation::new(0.0, 0.0).unwrap();
        let window = Window::new(0, 5).unwrap();
        assert!(nearest(&origin, &window, Vec::new()).is_empty());
    }

    #[test]
    fn nearest_first() {
        let origin = GeoLocation::new(47.0, 22.0).unwrap();
        let stations = vec![
            station(1, 47.1, 22.0),
            station(2, 47.0, 22.0),
            station(3, 47.05, 22.0),
        ];
        let window = Window::new(0, 1).unwrap();
        assert_eq!(ids(&nearest(&origin, &window, stations)), vec![2]);
    }

    #[test]
    fn ties_are_broken_by_id() {
        let origin = GeoLocation::new(10.0, 10.0).unwrap();
        let stations = vec![
            station(9, 10.0, 10.0),
            station(4, 10.0, 10.0),
            station(6, 10.0, 10.0),
        ];
        let window = Window::new(0, 10).unwrap();
        assert_eq!(ids(&nearest(&origin, &window, stations)), vec![4, 6, 9]);
    }

    #[test]
    fn window_is_applied_after_ranking() {
        let origin = GeoLocation::new(0.0, 0.0).unwrap();
        let stations = (1..=5).map(|i| station(i, f64::from(6 - i as i32), 0.0)).collect();
        let window = Window::new(1, 2).unwrap();
        assert_eq!(ids(&nearest(&origin, &window, stations)), vec![4, 3]);
    }

    #[test]
    fn ranked_distances_are_ascending() {
        let origin = GeoLocation::new(47.0, 22.0).unwrap();
        let stations = vec![
            station(1, 48.0, 23.0),
            station(2, 46.0, 21.0),
            station(3, 47.2, 22.1),
        ];
        let ranked = rank_by_distance(&origin, stations);
        assert!(ranked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        assert_eq!(ranked[0].station.id.as_i64(), 3);
    }

    #[test]
    fn origin_point_validates_both_parts() {
        assert!(OriginPoint::new(47.0, 22.0, 0, 0).window().is_err());
        assert!(OriginPoint::new(95.0, 22.0, 0, 5).location().is_err());
        assert!(OriginPoint::new(47.0, 22.0, 0, 5).location().is_ok());
    }

    #[test]
    fn origin_point_deserializes_with_default_offset() {
        let origin: OriginPoint =
            serde_json::from_str(r#"{"lat": 1.5, "lng": 2.5, "limit": 3}"#).unwrap();
        assert_eq!(origin, OriginPoint::new(1.5, 2.5, 0, 3));
    }
}
