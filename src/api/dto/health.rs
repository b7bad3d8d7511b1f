//! DTO for the health endpoint.

use serde::{Deserialize, Serialize};

/// Response body for `GET /healthz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub cache: bool,
}
