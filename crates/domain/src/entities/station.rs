//! Station entity

use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{GeoLocation, StationId},
};

/// Maximum length of the free-text station fields
pub const MAX_TEXT_LEN: usize = 255;

/// A geolocated station as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Storage-assigned identifier
    #[serde(rename = "station_id")]
    pub id: StationId,
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    /// Operator of the station
    pub provider: String,
}

impl Station {
    /// Combine an identifier with its field set
    #[must_use]
    pub fn new(id: StationId, fields: StationFields) -> Self {
        Self {
            id,
            name: fields.name,
            latitude: fields.latitude,
            longitude: fields.longitude,
            provider: fields.provider,
        }
    }

    /// Position of the station
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        GeoLocation::from_stored(self.latitude, self.longitude)
    }

    /// The mutable part of the station
    #[must_use]
    pub fn fields(&self) -> StationFields {
        StationFields {
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            provider: self.provider.clone(),
        }
    }
}

/// Field set used by create and update (everything but the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationFields {
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub provider: String,
}

impl StationFields {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            provider: provider.into(),
        }
    }

    /// Check the fields can be stored
    ///
    /// Coordinates are opaque but must be finite, text fields are bounded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStation` describing the first violation
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.latitude.is_finite() {
            return Err(DomainError::InvalidStation("lat must be finite".into()));
        }
        if !self.longitude.is_finite() {
            return Err(DomainError::InvalidStation("lng must be finite".into()));
        }
        if self.name.len() > MAX_TEXT_LEN {
            return Err(DomainError::InvalidStation(format!(
                "name exceeds {MAX_TEXT_LEN} bytes"
            )));
        }
        if self.provider.len() > MAX_TEXT_LEN {
            return Err(DomainError::InvalidStation(format!(
                "provider exceeds {MAX_TEXT_LEN} bytes"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> StationFields {
        StationFields::new("A", 47.0, 22.0, "P")
    }

    #[test]
    fn new_copies_fields() {
        let station = Station::new(StationId::from_raw(3), sample_fields());
        assert_eq!(station.id.as_i64(), 3);
        assert_eq!(station.name, "A");
        assert!((station.latitude - 47.0).abs() < f64::EPSILON);
        assert!((station.longitude - 22.0).abs() < f64::EPSILON);
        assert_eq!(station.provider, "P");
    }

    #[test]
    fn fields_round_trip_through_station() {
        let station = Station::new(StationId::from_raw(1), sample_fields());
        assert_eq!(station.fields(), sample_fields());
    }

    #[test]
    fn serializes_with_wire_names() {
        let station = Station::new(StationId::from_raw(7), sample_fields());
        let json = serde_json::to_value(&station).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "station_id": 7,
                "name": "A",
                "lat": 47.0,
                "lng": 22.0,
                "provider": "P"
            })
        );
    }

    #[test]
    fn fields_deserialize_from_wire_names() {
        let fields: StationFields = serde_json::from_value(serde_json::json!({
            "name": "B",
            "lat": 46.5,
            "lng": 23.25,
            "provider": "Q"
        }))
        .unwrap();
        assert_eq!(fields, StationFields::new("B", 46.5, 23.25, "Q"));
    }

    #[test]
    fn location_uses_station_coordinates() {
        let station = Station::new(StationId::from_raw(1), sample_fields());
        let loc = station.location();
        assert!((loc.latitude() - 47.0).abs() < f64::EPSILON);
        assert!((loc.longitude() - 22.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_accepts_out_of_range_but_finite_coordinates() {
        assert!(StationFields::new("x", 200.0, -500.0, "y").validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite() {
        assert!(StationFields::new("x", f64::NAN, 0.0, "y").validate().is_err());
        assert!(StationFields::new("x", 0.0, f64::NEG_INFINITY, "y").validate().is_err());
    }

    #[test]
    fn validate_rejects_long_text() {
        let long = "n".repeat(MAX_TEXT_LEN + 1);
        assert!(StationFields::new(long.clone(), 0.0, 0.0, "p").validate().is_err());
        assert!(StationFields::new("n", 0.0, 0.0, long).validate().is_err());
    }

    #[test]
    fn validate_accepts_empty_text() {
        assert!(StationFields::new("", 0.0, 0.0, "").validate().is_ok());
    }
}
