//! Cache entry model: a real record or a negative-cache tombstone.

use serde::{Deserialize, Serialize};

use super::ShortUrl;

/// What the cache knows about an id.
///
/// Tombstones record a confirmed-negative answer (`Deleted` after a
/// successful delete, `NotExist` after a store miss) so that repeated reads
/// of an unavailable id are answered without touching the store. Entries are
/// advisory: they live for a bounded TTL and are re-validated against the
/// store once evicted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CacheEntry {
    Present(ShortUrl),
    Deleted,
    NotExist,
}

impl CacheEntry {
    /// Returns true for the negative-cache variants.
    pub fn is_tombstone(&self) -> bool {
        matches!(self, CacheEntry::Deleted | CacheEntry::NotExist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_present_round_trips_through_json() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let entry = CacheEntry::Present(ShortUrl {
            id: 42,
            url: "https://example.com".to_string(),
            created_at,
            expire_at: created_at + Duration::hours(1),
            is_deleted: false,
        });

        let encoded = serde_json::to_string(&entry).unwrap();
        let decoded: CacheEntry = serde_json::from_str(&encoded).unwrap();

        assert_eq!(entry, decoded);
    }

    #[test]
    fn test_tombstones_are_tagged() {
        let encoded = serde_json::to_string(&CacheEntry::NotExist).unwrap();
        assert_eq!(encoded, r#"{"state":"not_exist"}"#);

        let decoded: CacheEntry = serde_json::from_str(r#"{"state":"deleted"}"#).unwrap();
        assert_eq!(decoded, CacheEntry::Deleted);
    }

    #[test]
    fn test_is_tombstone() {
        assert!(CacheEntry::Deleted.is_tombstone());
        assert!(CacheEntry::NotExist.is_tombstone());

        let created_at = Utc::now();
        let entry = CacheEntry::Present(ShortUrl {
            id: 1,
            url: "https://example.com".to_string(),
            created_at,
            expire_at: created_at + Duration::hours(1),
            is_deleted: true,
        });
        assert!(!entry.is_tombstone());
    }
}
