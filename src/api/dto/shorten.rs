//! DTOs for short URL creation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/v1/urls`.
///
/// `expire_at` is an RFC 3339 timestamp; the handler rejects values that are
/// not strictly in the future.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
    pub expire_at: String,
}

/// Response body for `POST /api/v1/urls`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub id: String,
    pub short_url: String,
}
