//! Handler for the health endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports liveness of the backing store and cache.
///
/// # Endpoint
///
/// `GET /healthz`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.repository.ping().await;
    let cache = state.cache.health_check().await;

    let status = if database { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        database,
        cache,
    })
}
