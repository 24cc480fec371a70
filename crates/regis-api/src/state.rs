//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. It holds the repository behind a trait object so
//! handlers are identical whether REGIS serves PostgreSQL or an in-memory
//! dataset.

use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regis_store::{MemoryRepository, Repository};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Application configuration, read from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// PostgreSQL connection string. `None` selects the in-memory repository.
    pub database_url: Option<String>,
    /// JSON dataset loaded into the in-memory repository.
    pub dataset_path: Option<PathBuf>,
    /// Fixed seed for sampling and filler text. `None` seeds from entropy
    /// on every request.
    pub sample_seed: Option<u64>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read `PORT`, `DATABASE_URL`, `REGIS_DATASET`, `REGIS_SAMPLE_SEED` and
    /// `LOG_FORMAT`. Unset or unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url: non_empty("DATABASE_URL"),
            dataset_path: non_empty("REGIS_DATASET").map(PathBuf::from),
            sample_seed: non_empty("REGIS_SAMPLE_SEED").and_then(|s| s.parse().ok()),
            log_format: match non_empty("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_deref().map(redact_url),
            )
            .field("dataset_path", &self.dataset_path)
            .field("sample_seed", &self.sample_seed)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Replace the userinfo part of a URL with `[REDACTED]`.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}[REDACTED]{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            dataset_path: None,
            sample_seed: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend.
    pub repo: Arc<dyn Repository>,
    /// Handle of the globally installed Prometheus recorder. Without one,
    /// each app records into its own recorder.
    pub metrics: Option<PrometheusHandle>,
    pub config: AppConfig,
}

impl AppState {
    /// Create a state over an empty in-memory repository with default
    /// configuration.
    pub fn new() -> Self {
        Self::with_repository(Arc::new(MemoryRepository::new()), AppConfig::default())
    }

    /// Create a state over the given repository.
    pub fn with_repository(repo: Arc<dyn Repository>, config: AppConfig) -> Self {
        Self {
            repo,
            metrics: None,
            config,
        }
    }

    /// Attach the handle of the globally installed Prometheus recorder.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// A fresh random source for one request.
    pub fn rng(&self) -> StdRng {
        match self.config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
