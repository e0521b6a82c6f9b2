//! HTTP handlers for the visualization API
//!
//! Query outcomes such as "no path" are ordinary 200 responses carrying the
//! sentinel result; only an unknown entity lookup is a 404.

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crate::algo::{
    find_all_paths, find_entities_within_degrees, find_path_to_center, find_shortest_path,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use super::AppState;

/// Endpoints of a path query
#[derive(Deserialize)]
pub struct PathQuery {
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct PathsQuery {
    pub from: String,
    pub to: String,
    pub max: Option<usize>,
}

#[derive(Deserialize)]
pub struct CenterQuery {
    pub center: Option<String>,
}

#[derive(Deserialize)]
pub struct NeighborhoodQuery {
    pub degrees: Option<i64>,
}

#[derive(Deserialize)]
pub struct MetricsQuery {
    pub top: Option<usize>,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Handler for system status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "snapshot": {
            "version": state.store.version(),
            "entities": state.store.len(),
            "connections": state.store.connection_count(),
            "danglingConnections": state.view.dangling,
        }
    }))
}

/// Handler for a single entity
pub async fn entity_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.store.get_entity(&id) {
        Some(entity) => Json(entity).into_response(),
        None => error(StatusCode::NOT_FOUND, format!("Entity {} not found", id)),
    }
}

/// Handler for the shortest path between two entities
pub async fn path_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Response {
    Json(find_shortest_path(&state.view, &query.from, &query.to)).into_response()
}

/// Handler for all simple paths; `max` is clamped to the configured bound
pub async fn paths_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathsQuery>,
) -> Response {
    let bound = state.analysis.max_path_length;
    let max = query.max.unwrap_or(bound).min(bound);
    Json(find_all_paths(&state.view, &query.from, &query.to, max)).into_response()
}

/// Handler for the explained path to the reference entity
pub async fn center_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<CenterQuery>,
) -> Response {
    let Some(center) = query.center.or_else(|| state.analysis.center_id.clone()) else {
        return error(StatusCode::BAD_REQUEST, "No center entity given and none configured");
    };

    let result = find_path_to_center(&state.view, &state.store, &id, &center, &state.explainer);
    Json(result).into_response()
}

/// Handler for the N-hop neighbourhood of an entity
pub async fn neighborhood_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<NeighborhoodQuery>,
) -> Response {
    let degrees = query
        .degrees
        .map(|d| d.max(0) as usize)
        .unwrap_or(state.analysis.max_degrees);
    Json(find_entities_within_degrees(&state.view, &id, degrees)).into_response()
}

/// Handler for the whole-graph metrics
pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MetricsQuery>,
) -> Response {
    let top = query.top.unwrap_or(state.analysis.top_n);
    let metrics = state.metrics.get_or_compute(&state.store, top);
    Json(metrics.as_ref()).into_response()
}
