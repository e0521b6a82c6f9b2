//! HTTP server implementation for the visualization API

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use super::handler::{
    center_handler, entity_handler, metrics_handler, neighborhood_handler, path_handler,
    paths_handler, status_handler,
};
use super::AppState;

/// Build the API router over a shared snapshot
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/entities/:id", get(entity_handler))
        .route("/api/path", get(path_handler))
        .route("/api/paths", get(paths_handler))
        .route("/api/center/:id", get(center_handler))
        .route("/api/neighborhood/:id", get(neighborhood_handler))
        .route("/api/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server exposing read-only queries over one snapshot
pub struct HttpServer {
    state: Arc<AppState>,
    addr: String,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(state: Arc<AppState>, addr: impl Into<String>) -> Self {
        Self {
            state,
            addr: addr.into(),
        }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(Arc::clone(&self.state));

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;

        info!("API available at http://{}", self.addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
