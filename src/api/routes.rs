//! API route configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{delete_handler, health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;

/// Builds the application router.
///
/// # Endpoints
///
/// - `POST   /api/v1/urls`          - Create a shortened URL
/// - `DELETE /api/v1/urls/{url_id}` - Soft-delete a shortened URL
/// - `GET    /healthz`              - Liveness of store and cache
/// - `GET    /{url_id}`             - Redirect to the destination URL
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/urls", post(shorten_handler))
        .route("/api/v1/urls/{url_id}", delete(delete_handler))
        .route("/healthz", get(health_handler))
        .route("/{url_id}", get(redirect_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
