//! # Requirements API
//!
//! Listing, random suggestions and lookup by id.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use regis_core::RequirementId;
use regis_query::{RequirementDetail, RequirementListResponse, DEFAULT_SAMPLE_LIMIT};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_path, extract_query, JurisdictionParams};
use crate::state::AppState;

fn default_limit() -> usize {
    DEFAULT_SAMPLE_LIMIT
}

/// Query parameters for `/requirements/suggested`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestedParams {
    /// Maximum number of requirements to return.
    #[serde(default = "default_limit")]
    #[param(default = 5, minimum = 0)]
    pub limit: usize,
    /// Exact, case-sensitive jurisdiction code. Empty means no filter.
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

/// Build the requirements router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/requirements/list", get(list_requirements))
        .route("/api/v1/requirements/suggested", get(suggested_requirements))
        .route("/api/v1/requirements/{id}", get(get_requirement))
}

/// GET /api/v1/requirements/list — All requirements, optionally by jurisdiction.
#[utoipa::path(
    get,
    path = "/api/v1/requirements/list",
    params(JurisdictionParams),
    responses(
        (status = 200, description = "Requirements in storage order", body = RequirementListResponse),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    ),
    tag = "requirements"
)]
pub(crate) async fn list_requirements(
    State(state): State<AppState>,
    query: Result<Query<JurisdictionParams>, QueryRejection>,
) -> Result<Json<RequirementListResponse>, AppError> {
    let params = extract_query(query)?;
    let mut rng = state.rng();
    let resp = regis_query::list_requirements(
        state.repo.as_ref(),
        &mut rng,
        params.jurisdiction.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}

/// GET /api/v1/requirements/suggested — Random sample of requirements.
#[utoipa::path(
    get,
    path = "/api/v1/requirements/suggested",
    params(SuggestedParams),
    responses(
        (status = 200, description = "Up to `limit` distinct requirements", body = RequirementListResponse),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    ),
    tag = "requirements"
)]
pub(crate) async fn suggested_requirements(
    State(state): State<AppState>,
    query: Result<Query<SuggestedParams>, QueryRejection>,
) -> Result<Json<RequirementListResponse>, AppError> {
    let params = extract_query(query)?;
    let mut rng = state.rng();
    let resp = regis_query::sample_requirements(
        state.repo.as_ref(),
        &mut rng,
        params.limit,
        params.jurisdiction.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}

/// GET /api/v1/requirements/{id} — One requirement.
#[utoipa::path(
    get,
    path = "/api/v1/requirements/{id}",
    params(("id" = i64, Path, description = "Requirement id")),
    responses(
        (status = 200, description = "Requirement found", body = RequirementDetail),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "No requirement with this id", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    ),
    tag = "requirements"
)]
pub(crate) async fn get_requirement(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RequirementDetail>, AppError> {
    let id = RequirementId(extract_path(id)?);
    let mut rng = state.rng();
    let resp = regis_query::get_requirement(state.repo.as_ref(), &mut rng, id).await?;
    Ok(Json(resp))
}
