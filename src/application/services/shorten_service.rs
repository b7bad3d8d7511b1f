//! Short URL creation and deletion service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::{CacheEntry, NewShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;

/// Service for the write path: creating and deleting short URLs.
///
/// The relational store is authoritative for both operations; the cache is
/// only primed or tombstoned opportunistically, and every cache failure is
/// swallowed after logging.
pub struct ShortenService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheStore>,
}

impl ShortenService {
    /// Creates a new shorten service.
    pub fn new(repository: Arc<dyn UrlRepository>, cache: Arc<dyn CacheStore>) -> Self {
        Self { repository, cache }
    }

    /// Creates a short URL record and returns its id.
    ///
    /// On success the cache is primed with the new record so the first
    /// redirect within the TTL window is served without a store lookup.
    /// A failed prime only costs that lookup.
    ///
    /// The caller is responsible for rejecting an `expire_at` that is not
    /// strictly in the future.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store create fails.
    pub async fn shorten(&self, url: String, expire_at: DateTime<Utc>) -> Result<i64, AppError> {
        let short_url = self
            .repository
            .create(NewShortUrl { url, expire_at })
            .await?;
        let id = short_url.id;

        if let Err(e) = self
            .cache
            .set(id, &CacheEntry::Present(short_url), None)
            .await
        {
            warn!("Failed to prime cache for new record {}: {}", id, e);
        }

        info!("Shortened url with id {}", id);
        Ok(id)
    }

    /// Soft-deletes a short URL record.
    ///
    /// The cache is consulted first: a tombstone means the record is already
    /// unavailable and the store is not touched (idempotent short-circuit).
    /// Otherwise the store delete runs, and on success a deleted-tombstone
    /// is written back so the next delete or redirect is answered from
    /// cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the store has no row for the id,
    /// and [`AppError::Internal`] on store failures.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        match self.cache.get(id).await {
            Ok(Some(entry)) if entry.is_tombstone() => {
                debug!("Record {} already unavailable, skipping store delete", id);
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => warn!("Cache get failed for {}: {}", id, e),
        }

        self.repository.delete(id).await?;

        if let Err(e) = self.cache.set(id, &CacheEntry::Deleted, None).await {
            warn!("Failed to write deleted tombstone for {}: {}", id, e);
        }

        info!("Deleted record with id {}", id);
        Ok(())
    }
}
