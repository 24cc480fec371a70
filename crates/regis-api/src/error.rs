//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps query-layer errors to HTTP status codes and returns JSON bodies with
//! an error code and message. Storage and internal error details are logged
//! but never returned to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use regis_query::QueryError;
use regis_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404). The message is returned verbatim.
    #[error("{0}")]
    NotFound(String),

    /// A path parameter is outside its enumeration (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Query string or path could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Storage backend failed or is unreachable (503). Message is logged
    /// but not returned to client.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::ServiceUnavailable(_) => "Storage backend unavailable".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert query errors to API errors.
///
/// A storage error that reports a corrupt row is an internal error; every
/// other storage error means the backend is unreachable or failing.
impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match &err {
            QueryError::Invalid(e) => Self::Validation(e.to_string()),
            QueryError::NotFound(id) => {
                tracing::debug!(%id, "requirement lookup missed");
                Self::NotFound(err.to_string())
            }
            QueryError::Storage(e) if matches!(e, StoreError::Decode { .. }) => {
                Self::Internal(e.to_string())
            }
            QueryError::Storage(e) => Self::ServiceUnavailable(e.to_string()),
        }
    }
}
