//! Handler for short URL creation.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{CreateUrlRequest, CreateUrlResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_id;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "expireAt": "2026-12-31T00:00:00Z" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the url is empty, `expireAt` is not RFC 3339,
/// or `expireAt` is not strictly in the future.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<Json<CreateUrlResponse>, AppError> {
    payload.validate()?;

    let expire_at = DateTime::parse_from_rfc3339(&payload.expire_at)
        .map_err(|e| {
            AppError::bad_request(
                "Invalid expireAt format",
                json!({ "expireAt": payload.expire_at, "reason": e.to_string() }),
            )
        })?
        .with_timezone(&Utc);

    if expire_at <= Utc::now() {
        return Err(AppError::bad_request(
            "expireAt must be in the future",
            json!({ "expireAt": payload.expire_at }),
        ));
    }

    let id = state.shorten_service.shorten(payload.url, expire_at).await?;
    let url_id = url_id::encode(id);
    let short_url = format!("{}/{}", state.base_url.trim_end_matches('/'), url_id);

    Ok(Json(CreateUrlResponse {
        id: url_id,
        short_url,
    }))
}
