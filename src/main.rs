// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::application::history_service::HistoryService;
use crate::application::runner_service::RunnerService;
use crate::application::snapshot_repository::SnapshotRepository;
use crate::infrastructure::config::{SnapshotSource, load_service_config};
use crate::infrastructure::influx_repository::InfluxRepository;
use crate::infrastructure::sample_repository::SampleSnapshotRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_average, get_history, get_insights, health_check, list_runners,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_service_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn SnapshotRepository> = match config.snapshots.source {
        SnapshotSource::Influx => {
            let influx = config
                .snapshots
                .influx
                .context("snapshots.source is 'influx' but [snapshots.influx] is missing")?;
            Arc::new(InfluxRepository::new(
                influx.host,
                influx.token,
                influx.database,
                influx.retention_policy,
            ))
        }
        SnapshotSource::Sample => Arc::new(SampleSnapshotRepository::new(
            config.snapshots.sample.seed,
            config.snapshots.sample.runners,
        )),
    };

    // Create services (application layer)
    let runner_service = RunnerService::new(repository.clone());
    let history_service = HistoryService::new(repository.clone());

    // Create application state
    let state = Arc::new(AppState {
        runner_service,
        history_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/runners", get(list_runners))
        .route("/runners/:id/history", get(get_history))
        .route("/runners/:id/insights", get(get_insights))
        .route("/runners/:id/average/:metric", get(get_average))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .context("invalid server.bind address")?;
    tracing::info!("Starting stride-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
