//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_id;

/// Redirects a url id to its destination URL.
///
/// # Endpoint
///
/// `GET /{url_id}`
///
/// # Errors
///
/// Returns 400 Bad Request on a malformed url id and 404 Not Found when the
/// record is nonexistent, deleted or expired.
pub async fn redirect_handler(
    Path(url_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let id = url_id::decode(&url_id)?;

    let url = state.redirect_service.resolve(id).await?;

    Ok(Redirect::to(&url))
}
