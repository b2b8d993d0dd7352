//! Geographic point and great-circle distance

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Create a validated location
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if either value is not
    /// finite, latitude is outside [-90, 90] or longitude is outside
    /// [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(DomainError::coordinates(format!(
                "({latitude}, {longitude}) is not a finite point"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::coordinates(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::coordinates(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Wrap stored coordinates as-is
    ///
    /// Stored station coordinates are opaque; distances computed from
    /// out-of-range values are still finite and totally ordered.
    #[must_use]
    pub const fn from_stored(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point in kilometres (haversine)
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let half_dlat = ((other.latitude - self.latitude).to_radians() / 2.0).sin();
        let half_dlng = ((other.longitude - self.longitude).to_radians() / 2.0).sin();

        let h = (lat1.cos() * lat2.cos())
            .mul_add(half_dlng.powi(2), half_dlat.powi(2))
            .clamp(0.0, 1.0);

        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_bounds() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range_latitude() {
        let err = GeoLocation::new(90.5, 0.0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCoordinates(_)));
    }

    #[test]
    fn new_rejects_out_of_range_longitude() {
        assert!(GeoLocation::new(0.0, -180.1).is_err());
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
        assert!(GeoLocation::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let oradea = GeoLocation::new(47.0722, 21.9211).unwrap();
        assert!(oradea.distance_km(&oradea).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoLocation::new(47.0, 22.0).unwrap();
        let b = GeoLocation::new(46.77, 23.59).unwrap();
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = GeoLocation::new(47.0, 22.0).unwrap();
        let b = GeoLocation::new(48.0, 22.0).unwrap();
        let d = a.distance_km(&b);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn antipodes_are_half_circumference_apart() {
        let a = GeoLocation::new(0.0, 0.0).unwrap();
        let b = GeoLocation::new(0.0, 180.0).unwrap();
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((a.distance_km(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn stored_out_of_range_values_still_yield_finite_distance() {
        let origin = GeoLocation::new(0.0, 0.0).unwrap();
        let odd = GeoLocation::from_stored(123.0, 400.0);
        assert!(origin.distance_km(&odd).is_finite());
    }

    #[test]
    fn display_formats_six_decimals() {
        let loc = GeoLocation::new(47.0, 22.5).unwrap();
        assert_eq!(loc.to_string(), "47.000000, 22.500000");
    }
}
