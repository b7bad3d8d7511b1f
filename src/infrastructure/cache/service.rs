//! Cache store trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::CacheEntry;

/// Errors that can occur during cache operations.
///
/// These never reach API callers: services log them and carry on as if the
/// cache had missed.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value front for short URL records, keyed by the raw integer id.
///
/// A miss is `Ok(None)`; an `Err` is a backend failure that callers treat as
/// a miss after logging it. Entries expire after a bounded TTL independent of
/// the record's own expiry, which caps the staleness window for deletes and
/// expirations that happen between cache fill and eviction.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves the entry for an id. `Ok(None)` signals a miss.
    async fn get(&self, id: i64) -> CacheResult<Option<CacheEntry>>;

    /// Stores an entry under an id.
    ///
    /// `ttl_seconds` overrides the store's default TTL when given. Writes are
    /// best-effort: callers log failures and never propagate them.
    async fn set(&self, id: i64, entry: &CacheEntry, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes the entry for an id, if any. Best-effort like [`Self::set`].
    async fn evict(&self, id: i64) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
