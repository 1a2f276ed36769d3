use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers,
    handlers::predict::AppState,
    metrics,
    pipeline::FittedPipeline,
};

/// Start the prediction server
///
/// This function:
/// 1. Installs the metrics recorder
/// 2. Wraps the already-loaded pipeline into shared state
/// 3. Binds to the configured address
/// 4. Serves requests until a shutdown signal arrives
pub async fn start_server(config: &Config, pipeline: FittedPipeline) -> Result<()> {
    let handle = metrics::init_metrics();

    info!(
        trained_at = %pipeline.info.trained_at,
        train_rows = pipeline.info.n_train_rows,
        n_columns = pipeline.encoder().n_columns(),
        "Model artifact loaded"
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
        metrics: handle,
    };
    let app = create_router(state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting insurance predictor on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/predict", post(handlers::predict::handle_predict))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics_handler::metrics_text))
        .with_state(state)
        // Request bodies are one small JSON object; anything larger is noise
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, draining connections...");
    }
}
