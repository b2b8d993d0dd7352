//! API error handling
//!
//! Every failure leaves the API as `{ "error", "code", "details"? }`. In
//! production mode storage and internal failures carry no details.

use std::sync::atomic::{AtomicBool, Ordering};

use application::{ApplicationError, ErrorKind, QueryError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Whether storage and internal error details reach the client
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details are included in responses
///
/// Set to `false` in production.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be decoded (bad JSON, bad query string)
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid query document")]
    QueryDocument(Vec<QueryError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Storage did not answer within the configured deadline
    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error kind
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidArgument(_) | Self::QueryDocument(_) => {
                StatusCode::BAD_REQUEST
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageUnavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cancelled(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Stable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument.code(),
            Self::QueryDocument(_) => ErrorKind::QueryDocument.code(),
            Self::NotFound(_) => ErrorKind::NotFound.code(),
            Self::StorageUnavailable(_) => ErrorKind::StorageUnavailable.code(),
            Self::Cancelled(_) => ErrorKind::Cancelled.code(),
            Self::Internal(_) => ErrorKind::Internal.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            Self::BadRequest(msg) | Self::InvalidArgument(msg) | Self::NotFound(msg) => (msg, None),
            Self::QueryDocument(errors) => (
                "Query document failed to parse or validate".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            Self::Cancelled(msg) => {
                warn!(%msg, "Request cancelled");
                ("The storage operation did not complete in time".to_string(), None)
            },
            Self::StorageUnavailable(msg) => {
                error!(%msg, "Storage unavailable");
                let details = should_expose_details().then(|| serde_json::Value::String(msg));
                ("Storage is temporarily unavailable".to_string(), details)
            },
            Self::Internal(msg) => {
                error!(%msg, "Internal error");
                let details = should_expose_details().then(|| serde_json::Value::String(msg));
                ("An internal error occurred".to_string(), details)
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::InvalidArgument(e.to_string()),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::QueryDocument(errors) => Self::QueryDocument(errors),
            ApplicationError::StorageUnavailable(msg) => Self::StorageUnavailable(msg),
            ApplicationError::Cancelled(msg) => Self::Cancelled(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<domain::DomainError> for ApiError {
    fn from(err: domain::DomainError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use domain::DomainError;

    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidArgument("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::QueryDocument(vec![]).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::StorageUnavailable("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Cancelled("x".into()).status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn from_application_error_by_kind() {
        let err: ApiError = ApplicationError::Domain(DomainError::pagination("limit 0")).into();
        assert!(matches!(err, ApiError::InvalidArgument(_)));

        let err: ApiError = ApplicationError::station_not_found(3).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = ApplicationError::Cancelled("deadline".into()).into();
        assert!(matches!(err, ApiError::Cancelled(_)));

        let err: ApiError = ApplicationError::Internal("bad".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn domain_error_is_invalid_argument() {
        let err: ApiError = DomainError::InvalidStationId("abc".into()).into();
        assert_eq!(err.code(), "invalid_argument");
    }

    #[tokio::test]
    async fn not_found_body() {
        let (status, body) = body_json(ApiError::NotFound("station 9".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["error"], "station 9");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn query_document_body_lists_errors() {
        let err = ApiError::QueryDocument(vec![QueryError::new("Unknown field").at(1, 10)]);
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "query_document");
        assert_eq!(body["details"][0]["message"], "Unknown field");
        assert_eq!(body["details"][0]["locations"][0]["column"], 10);
    }

    #[tokio::test]
    async fn cancelled_body() {
        let (status, body) = body_json(ApiError::Cancelled("get_all".into())).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["code"], "cancelled");
    }

    #[tokio::test]
    async fn internal_body_uses_generic_message() {
        let (status, body) = body_json(ApiError::Internal("disk on fire".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
        assert_eq!(body["code"], "internal_error");
    }
}
