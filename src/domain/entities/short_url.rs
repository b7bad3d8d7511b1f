//! Short URL record, the only persistent entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL record with its lifecycle flags.
///
/// The numeric `id` is the internal form of the external url id. An id is
/// never reused while its record is live; it only comes back after the record
/// has been retired into the recyclable pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl ShortUrl {
    /// Returns true if the record has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expire_at < Utc::now()
    }

    /// Returns true if the record can still be resolved: not deleted and not
    /// expired.
    pub fn is_live(&self) -> bool {
        !self.is_deleted && !self.is_expired()
    }
}

/// Input data for creating a new short URL record.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub url: String,
    pub expire_at: DateTime<Utc>,
}
