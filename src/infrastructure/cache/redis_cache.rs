//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheStore};
use crate::domain::entities::CacheEntry;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Redis cache for short URL records.
///
/// Entries are stored as JSON under `url:{id}` with a fixed TTL. Backend
/// failures are returned to callers, who log them and fall back to the
/// relational store.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and
    /// configures the default entry TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, id: i64) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, id: i64) -> CacheResult<Option<CacheEntry>> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();

        let value: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {}: {}", key, e)))?;

        let Some(value) = value else {
            debug!("Cache MISS: {}", id);
            return Ok(None);
        };

        match serde_json::from_str(&value) {
            Ok(entry) => {
                debug!("Cache HIT: {}", id);
                Ok(Some(entry))
            }
            Err(e) => {
                // An undecodable entry is treated as a miss; the next read
                // repopulates it from the store.
                warn!("Dropping undecodable cache entry for {}: {}", id, e);
                Ok(None)
            }
        }
    }

    async fn set(&self, id: i64, entry: &CacheEntry, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        let value = serde_json::to_string(entry)
            .map_err(|e| CacheError::Operation(format!("encode entry for {}: {}", key, e)))?;

        conn.set_ex::<_, _, ()>(&key, value, ttl)
            .await
            .map_err(|e| CacheError::Operation(format!("SET {}: {}", key, e)))?;

        debug!("Cache SET: {} (TTL: {}s)", id, ttl);
        Ok(())
    }

    async fn evict(&self, id: i64) -> CacheResult<()> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();

        let deleted: i32 = conn
            .del(&key)
            .await
            .map_err(|e| CacheError::Operation(format!("DEL {}: {}", key, e)))?;

        if deleted > 0 {
            debug!("Cache EVICT: {}", id);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
