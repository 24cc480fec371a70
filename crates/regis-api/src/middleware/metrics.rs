//! # Prometheus Metrics
//!
//! Request counters and latency histograms recorded through the `metrics`
//! facade and exposed by `metrics-exporter-prometheus`. HTTP metrics are
//! labelled by method, matched route and status.
//!
//! When the binary installs a global recorder, [`ApiMetrics`] renders that
//! recorder's handle. Otherwise each app builds its own recorder and records
//! into it as a local recorder, so `/metrics` always serves real exporter
//! output.
//!
//! The in-process atomics mirror the two totals for cheap reads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

/// Shared metrics state.
#[derive(Clone)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
    handle: PrometheusHandle,
    /// Set when no global recorder is installed.
    local: Option<Arc<PrometheusRecorder>>,
}

impl ApiMetrics {
    /// Create a metrics instance with its own recorder.
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
            handle,
            local: Some(Arc::new(recorder)),
        }
    }

    /// Create a metrics instance over the globally installed recorder.
    pub fn with_handle(handle: PrometheusHandle) -> Self {
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
            handle,
            local: None,
        }
    }

    /// Return current request count.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Return current error count.
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Record one finished request.
    pub fn record(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let is_error = status >= 400;
        if is_error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }

        let emit = || {
            let labels = [
                ("method", method.to_owned()),
                ("path", path.to_owned()),
                ("status", status.to_string()),
            ];
            metrics::counter!("regis_http_requests_total", &labels).increment(1);
            metrics::histogram!("regis_http_request_duration_seconds", &labels)
                .record(elapsed.as_secs_f64());
            metrics::counter!("regis_api_requests_total").increment(1);
            if is_error {
                metrics::counter!("regis_api_errors_total").increment(1);
            }
        };

        match &self.local {
            Some(recorder) => metrics::with_local_recorder(recorder.as_ref(), emit),
            None => emit(),
        }
    }

    /// Prometheus text exposition of everything recorded so far.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .field("local_recorder", &self.local.is_some())
            .finish()
    }
}

/// Middleware that counts requests and errors and records latency.
///
/// Mounted with `route_layer` so the matched route template is available as
/// a low-cardinality label.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let api_metrics = request.extensions().get::<ApiMetrics>().cloned();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = request.method().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = api_metrics {
        m.record(&method, &path, response.status().as_u16(), start.elapsed());
    }
    response
}

/// GET /metrics — Prometheus exposition.
pub async fn render_metrics(Extension(api_metrics): Extension<ApiMetrics>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        api_metrics.render(),
    )
        .into_response()
}
