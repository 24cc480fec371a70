//! # Risks API
//!
//! Risk-category breakdown and per-category requirement lists.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use regis_query::{RiskDetailResponse, RiskSummaryResponse};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_query, JurisdictionParams};
use crate::state::AppState;

/// Build the risks router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/risks/summary", get(risk_summary))
        .route("/api/v1/risks/detail/{risk_type}", get(risk_detail))
}

/// GET /api/v1/risks/summary — Requirement counts per risk type.
#[utoipa::path(
    get,
    path = "/api/v1/risks/summary",
    params(JurisdictionParams),
    responses(
        (status = 200, description = "Non-empty risk categories in declaration order", body = RiskSummaryResponse),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    ),
    tag = "risks"
)]
pub(crate) async fn risk_summary(
    State(state): State<AppState>,
    query: Result<Query<JurisdictionParams>, QueryRejection>,
) -> Result<Json<RiskSummaryResponse>, AppError> {
    let params = extract_query(query)?;
    let resp = regis_query::risk_summary(state.repo.as_ref(), params.jurisdiction.as_deref()).await?;
    Ok(Json(resp))
}

/// GET /api/v1/risks/detail/{risk_type} — Requirements of one risk type.
#[utoipa::path(
    get,
    path = "/api/v1/risks/detail/{risk_type}",
    params(
        ("risk_type" = String, Path, description = "AML, FRAUD, CYBERSECURITY, GOVERNANCE, PRIVACY, OPERATIONAL, COMPLIANCE or OTHER"),
        JurisdictionParams,
    ),
    responses(
        (status = 200, description = "Requirements of the risk type", body = RiskDetailResponse),
        (status = 422, description = "Unknown risk type", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    ),
    tag = "risks"
)]
pub(crate) async fn risk_detail(
    State(state): State<AppState>,
    Path(risk_type): Path<String>,
    query: Result<Query<JurisdictionParams>, QueryRejection>,
) -> Result<Json<RiskDetailResponse>, AppError> {
    let params = extract_query(query)?;
    let resp = regis_query::risk_detail(
        state.repo.as_ref(),
        &risk_type,
        params.jurisdiction.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}
