//! Redirect lookup service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::CacheEntry;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;

/// Service for the read path: resolving an id to its destination URL.
///
/// Cache-aside: the cache is consulted first and trusted for the read,
/// tombstones included. On a miss the relational store is authoritative and
/// the cache is repopulated, so the next read within the TTL window is
/// served from cache even when the answer is "unavailable".
pub struct RedirectService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheStore>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<dyn UrlRepository>, cache: Arc<dyn CacheStore>) -> Self {
        Self { repository, cache }
    }

    /// Resolves an id to its destination URL.
    ///
    /// The liveness check is applied uniformly to cached and freshly-read
    /// records: deleted, expired and nonexistent ids all surface as
    /// [`AppError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the record is unavailable and
    /// [`AppError::Internal`] on store failures. Cache failures are logged
    /// and treated as misses.
    pub async fn resolve(&self, id: i64) -> Result<String, AppError> {
        let (entry, cached) = self.fetch_entry(id).await?;

        if !cached {
            if let Err(e) = self.cache.set(id, &entry, None).await {
                warn!("Failed to cache record {}: {}", id, e);
            }
        }

        match entry {
            CacheEntry::Present(short_url) if short_url.is_live() => {
                debug!("Resolved {} to {}", id, short_url.url);
                Ok(short_url.url)
            }
            _ => Err(AppError::not_found(
                "Short URL not found",
                json!({ "id": id }),
            )),
        }
    }

    /// Fetches the entry for an id, cache first.
    ///
    /// The returned flag is true when the entry came from the cache; a fresh
    /// store read still has to be written back by the caller. A store miss
    /// writes a negative-cache entry immediately so repeated lookups of a
    /// nonexistent id stop hitting the store.
    async fn fetch_entry(&self, id: i64) -> Result<(CacheEntry, bool), AppError> {
        match self.cache.get(id).await {
            Ok(Some(entry)) => return Ok((entry, true)),
            Ok(None) => {}
            Err(e) => warn!("Cache get failed for {}: {}", id, e),
        }

        match self.repository.get(id).await? {
            Some(short_url) => Ok((CacheEntry::Present(short_url), false)),
            None => {
                if let Err(e) = self.cache.set(id, &CacheEntry::NotExist, None).await {
                    warn!("Failed to cache negative entry for {}: {}", id, e);
                }
                Err(AppError::not_found(
                    "Short URL not found",
                    json!({ "id": id }),
                ))
            }
        }
    }
}
