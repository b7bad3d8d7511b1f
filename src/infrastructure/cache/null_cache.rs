//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, CacheStore};
use crate::domain::entities::CacheEntry;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is unavailable or caching is explicitly disabled. Every
/// read misses, every write succeeds without storing anything, so all
/// lookups fall through to the relational store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullCache {
    async fn get(&self, _id: i64) -> CacheResult<Option<CacheEntry>> {
        Ok(None)
    }

    async fn set(
        &self,
        _id: i64,
        _entry: &CacheEntry,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn evict(&self, _id: i64) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
