//! Conversion between internal ids and external url ids.
//!
//! The two functions are inverses of each other over the set of strings
//! [`decode`] accepts: canonical decimal, no sign, no leading zeros.

use serde_json::json;

use crate::error::AppError;

/// Encodes an internal id as its external url id.
pub fn encode(id: i64) -> String {
    id.to_string()
}

/// Decodes an external url id back to the internal id.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for anything that is not the canonical
/// encoding of a non-negative `i64`: empty input, non-digit characters,
/// signs, leading zeros, or overflow.
pub fn decode(url_id: &str) -> Result<i64, AppError> {
    let malformed = || {
        AppError::bad_request(
            "url_id is in wrong format",
            json!({ "url_id": url_id }),
        )
    };

    if url_id.is_empty() || !url_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    // Reject non-canonical forms so every accepted string round-trips.
    if url_id.len() > 1 && url_id.starts_with('0') {
        return Err(malformed());
    }

    url_id.parse::<i64>().map_err(|_| malformed())
}
