//! # regis-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the REGIS API.
//! Binds to configurable port (default 8080).

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use regis_api::state::{AppConfig, AppState, LogFormat};
use regis_store::{MemoryRepository, PgRepository, Repository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build configuration from environment.
    let config = AppConfig::from_env();

    // Initialize structured tracing.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::debug!(?config, "configuration loaded");

    // Initialize database pool (optional — absent means in-memory only).
    let db_pool = regis_store::init_pool(config.database_url.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    let repo: Arc<dyn Repository> = match (db_pool, &config.dataset_path) {
        (Some(pool), _) => {
            tracing::info!("serving from PostgreSQL");
            Arc::new(PgRepository::new(pool))
        }
        (None, Some(path)) => {
            let dataset = regis_store::read_dataset(path).map_err(|e| {
                tracing::error!("Dataset load failed: {e}");
                e
            })?;
            Arc::new(MemoryRepository::from_dataset(dataset)?)
        }
        (None, None) => {
            tracing::warn!(
                "Neither DATABASE_URL nor REGIS_DATASET is set. Serving an empty dataset."
            );
            Arc::new(MemoryRepository::new())
        }
    };

    let port = config.port;
    let mut state = AppState::with_repository(repo, config);
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => tracing::warn!("Prometheus recorder not installed: {e}"),
    }

    let app = regis_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("REGIS API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}
