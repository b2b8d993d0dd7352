//! Station identifier value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Identifier of a station, assigned by storage on creation
///
/// Identifiers are positive and never reused once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(i64);

impl StationId {
    /// Create an identifier from caller input
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStationId` if the value is not positive
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 1 {
            return Err(DomainError::InvalidStationId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Wrap an identifier read back from storage
    #[must_use]
    pub const fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::InvalidStationId(s.to_string()))?;
        Self::new(value)
    }
}

impl From<StationId> for i64 {
    fn from(id: StationId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_positive() {
        let id = StationId::new(42).unwrap();
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn new_rejects_zero_and_negative() {
        assert!(StationId::new(0).is_err());
        assert!(StationId::new(-7).is_err());
    }

    #[test]
    fn parse_from_path_segment() {
        let id: StationId = "17".parse().unwrap();
        assert_eq!(id, StationId::from_raw(17));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "abc".parse::<StationId>().unwrap_err();
        assert_eq!(err, DomainError::InvalidStationId("abc".to_string()));
    }

    #[test]
    fn parse_rejects_zero() {
        assert!("0".parse::<StationId>().is_err());
    }

    #[test]
    fn ordering_follows_value() {
        assert!(StationId::from_raw(1) < StationId::from_raw(2));
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&StationId::from_raw(5)).unwrap();
        assert_eq!(json, "5");
        let back: StationId = serde_json::from_str("5").unwrap();
        assert_eq!(back.as_i64(), 5);
    }

    #[test]
    fn display_shows_value() {
        assert_eq!(StationId::from_raw(9).to_string(), "9");
    }
}
