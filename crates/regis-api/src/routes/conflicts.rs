//! # Conflicts API
//!
//! Contradiction/overlap breakdown and joined conflict listings.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use regis_query::{ConflictsDetailResponse, ConflictsSummaryResponse};

use crate::error::{AppError, ErrorBody};
use crate::extractors::{extract_query, JurisdictionParams};
use crate::state::AppState;

/// Build the conflicts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/conflicts/summary", get(conflicts_summary))
        .route("/api/v1/conflicts/detail/{conflict_type}", get(conflicts_detail))
}

/// GET /api/v1/conflicts/summary — Contradiction and overlap counts.
#[utoipa::path(
    get,
    path = "/api/v1/conflicts/summary",
    params(JurisdictionParams),
    responses(
        (status = 200, description = "Both kinds, or no items when there are no conflicts", body = ConflictsSummaryResponse),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    ),
    tag = "conflicts"
)]
pub(crate) async fn conflicts_summary(
    State(state): State<AppState>,
    query: Result<Query<JurisdictionParams>, QueryRejection>,
) -> Result<Json<ConflictsSummaryResponse>, AppError> {
    let params = extract_query(query)?;
    let resp =
        regis_query::conflicts_summary(state.repo.as_ref(), params.jurisdiction.as_deref()).await?;
    Ok(Json(resp))
}

/// GET /api/v1/conflicts/detail/{conflict_type} — Conflict records joined to
/// their requirements.
#[utoipa::path(
    get,
    path = "/api/v1/conflicts/detail/{conflict_type}",
    params(
        ("conflict_type" = String, Path, description = "contradiction or overlap"),
        JurisdictionParams,
    ),
    responses(
        (status = 200, description = "Resolvable conflict records", body = ConflictsDetailResponse),
        (status = 422, description = "Unknown conflict type", body = ErrorBody),
        (status = 503, description = "Storage unavailable", body = ErrorBody),
    ),
    tag = "conflicts"
)]
pub(crate) async fn conflicts_detail(
    State(state): State<AppState>,
    Path(conflict_type): Path<String>,
    query: Result<Query<JurisdictionParams>, QueryRejection>,
) -> Result<Json<ConflictsDetailResponse>, AppError> {
    let params = extract_query(query)?;
    let resp = regis_query::conflicts_detail(
        state.repo.as_ref(),
        &conflict_type,
        params.jurisdiction.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}
