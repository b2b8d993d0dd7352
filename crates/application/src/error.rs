//! Application-level errors

use std::fmt;

use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Position of a problem inside a query document (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

/// One parse, validation or execution problem reported by the query engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.locations.push(SourceLocation { line, column });
        self
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(loc) = self.locations.first() {
            write!(f, " (line {}, column {})", loc.line, loc.column)?;
        }
        Ok(())
    }
}

fn join_messages(errors: &[QueryError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Coarse classification of failures, used for status mapping at the edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    QueryDocument,
    StorageUnavailable,
    Cancelled,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidArgument => "invalid_argument",
            Self::QueryDocument => "query_document",
            Self::StorageUnavailable => "storage_unavailable",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal_error",
        }
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Caller-supplied argument rejected by the domain
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No record with the requested identity
    #[error("Not found: {0}")]
    NotFound(String),

    /// Query text failed to parse or validate
    #[error("Invalid query document: {}", join_messages(.0))]
    QueryDocument(Vec<QueryError>),

    /// Storage could not be reached or failed to answer
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The operation was abandoned before completing
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::QueryDocument(_) => ErrorKind::QueryDocument,
            Self::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Create a station not found error
    pub fn station_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound(format!("station {id}"))
    }
}
