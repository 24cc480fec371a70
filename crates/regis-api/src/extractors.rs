//! # Custom Extractors
//!
//! Helpers that unwrap axum's query-string and path extractors, mapping
//! their rejections to [`AppError::BadRequest`] so malformed input gets the
//! same structured error body as every other failure.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;

/// Extract query parameters, mapping deserialization errors to
/// [`AppError::BadRequest`].
///
/// Handlers use:
/// ```ignore
/// async fn handler(query: Result<Query<T>, QueryRejection>) -> Result<..., AppError> {
///     let params = extract_query(query)?;
/// }
/// ```
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract path parameters, mapping deserialization errors to
/// [`AppError::BadRequest`].
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Optional jurisdiction filter accepted by every listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JurisdictionParams {
    /// Exact, case-sensitive jurisdiction code. Empty means no filter.
    #[serde(default)]
    pub jurisdiction: Option<String>,
}
