//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "REGIS API",
        version = "0.1.0",
        description = "Read-only queries over regulatory requirements: listings, risk-category breakdowns, and contradictions and overlaps between requirements.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Requirements
        crate::routes::requirements::list_requirements,
        crate::routes::requirements::suggested_requirements,
        crate::routes::requirements::get_requirement,
        // Risks
        crate::routes::risks::risk_summary,
        crate::routes::risks::risk_detail,
        // Conflicts
        crate::routes::conflicts::conflicts_summary,
        crate::routes::conflicts::conflicts_detail,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Requirement DTOs
        regis_query::RequirementListItem,
        regis_query::RequirementListResponse,
        regis_query::RequirementDetail,
        regis_query::RequirementRef,
        // Risk DTOs
        regis_query::RiskSummaryItem,
        regis_query::RiskSummaryResponse,
        regis_query::RiskDetailResponse,
        // Conflict DTOs
        regis_query::ConflictSummaryItem,
        regis_query::ConflictsSummaryResponse,
        regis_query::ConflictItem,
        regis_query::ConflictsDetailResponse,
    )),
    tags(
        (name = "requirements", description = "Requirement listing, sampling and lookup"),
        (name = "risks", description = "Risk-category breakdowns"),
        (name = "conflicts", description = "Contradictions and overlaps between requirements"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/requirements/list",
            "/api/v1/requirements/suggested",
            "/api/v1/requirements/{id}",
            "/api/v1/risks/summary",
            "/api/v1/risks/detail/{risk_type}",
            "/api/v1/conflicts/summary",
            "/api/v1/conflicts/detail/{conflict_type}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
