//! Handler for short URL deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_id;

/// Soft-deletes a short URL.
///
/// # Endpoint
///
/// `DELETE /api/v1/urls/{url_id}`
///
/// Deleting an already-deleted url id succeeds again: the cached tombstone
/// short-circuits the store call.
///
/// # Errors
///
/// Returns 400 Bad Request on a malformed url id and 404 Not Found when the
/// id was never allocated.
pub async fn delete_handler(
    Path(url_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = url_id::decode(&url_id)?;

    state.shorten_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
