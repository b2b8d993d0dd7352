//! Domain-level errors

use thiserror::Error;

/// Errors raised by domain validation
///
/// Every variant describes a caller-supplied argument that falls outside
/// the contract of a domain operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Offset/limit window outside the accepted bounds
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Coordinates that cannot be used as a search origin
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Station identifier that is not a positive integer
    #[error("Invalid station id: {0}")]
    InvalidStationId(String),

    /// Station fields rejected before reaching storage
    #[error("Invalid station: {0}")]
    InvalidStation(String),
}

impl DomainError {
    /// Create a pagination error
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::InvalidPagination(message.into())
    }

    /// Create a coordinates error
    pub fn coordinates(message: impl Into<String>) -> Self {
        Self::InvalidCoordinates(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_error_message() {
        let err = DomainError::pagination("limit must be between 1 and 20, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid pagination: limit must be between 1 and 20, got 0"
        );
    }

    #[test]
    fn coordinates_error_message() {
        let err = DomainError::coordinates("latitude 91 is out of range");
        assert_eq!(err.to_string(), "Invalid coordinates: latitude 91 is out of range");
    }

    #[test]
    fn station_id_error_message() {
        let err = DomainError::InvalidStationId("abc".to_string());
        assert_eq!(err.to_string(), "Invalid station id: abc");
    }

    #[test]
    fn station_error_message() {
        let err = DomainError::InvalidStation("lat is not finite".to_string());
        assert_eq!(err.to_string(), "Invalid station: lat is not finite");
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(
            DomainError::pagination("x"),
            DomainError::InvalidPagination("x".to_string())
        );
        assert_ne!(DomainError::pagination("x"), DomainError::coordinates("x"));
    }
}
