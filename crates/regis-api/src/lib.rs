//! # regis-api — Axum API Service for REGIS
//!
//! HTTP surface over the query operations in `regis-query`. Handlers parse
//! the request, call one query function against the shared repository and
//! serialize its result; they hold no logic of their own.
//!
//! ## API Surface
//!
//! | Prefix                   | Module                     | Domain        |
//! |--------------------------|----------------------------|---------------|
//! | `/api/v1/requirements/*` | [`routes::requirements`]   | Requirements  |
//! | `/api/v1/risks/*`        | [`routes::risks`]          | Risk types    |
//! | `/api/v1/conflicts/*`    | [`routes::conflicts`]      | Conflicts     |
//! | `/health/*`, `/metrics`  | this module, [`middleware::metrics`] | Operations |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware (API routes only) → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Generated via utoipa derive macros and served at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::{AppConfig, AppState};

use axum::extract::State;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = match &state.metrics {
        Some(handle) => ApiMetrics::with_handle(handle.clone()),
        None => ApiMetrics::new(),
    };

    let api = Router::new()
        .merge(routes::requirements::router())
        .merge(routes::risks::router())
        .merge(routes::conflicts::router())
        .merge(openapi::router())
        .route_layer(from_fn(middleware::metrics::metrics_middleware));

    let ops = Router::new()
        .route("/", get(root))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(middleware::metrics::render_metrics));

    Router::new()
        .merge(ops)
        .merge(api)
        .layer(Extension(metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "REGIS Backend running successfully" }))
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 once the storage backend answers.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state
        .repo
        .ping()
        .await
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
    Ok("ready")
}
