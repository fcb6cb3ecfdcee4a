mod routes;
mod schemas;
mod state;

pub use schemas::{HealthResponse, UploadsDirStatus};
pub use state::GenState;

use std::sync::Arc;
use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use crate::backend::routes::api_routes;
use crate::config::ServiceConfig;
use crate::generator::Generator;

pub fn router(state: Arc<GenState>) -> Router {
    Router::new()
        .merge(api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until ctrl-c
pub async fn serve(config: &ServiceConfig, generator: Generator) -> anyhow::Result<()> {
    let app = router(Arc::new(GenState::new(generator)));
    let addr = config.bind_addr();

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Starting backend server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
