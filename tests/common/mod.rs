//! In-memory fakes of the repository and cache, plus state helpers.
//!
//! The fakes implement the same contracts as the PostgreSQL and Redis
//! implementations (recyclable-pool claim on create, idempotent delete,
//! expiry guard on retire, bounded scan channel) so the full lifecycle can
//! be exercised without external services.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use shortly::application::services::{RedirectService, ShortenService};
use shortly::domain::entities::{CacheEntry, NewShortUrl, ShortUrl};
use shortly::domain::repositories::UrlRepository;
use shortly::error::AppError;
use shortly::infrastructure::cache::{CacheResult, CacheStore};
use shortly::state::AppState;

pub const BASE_URL: &str = "https://sho.rt";

#[derive(Default)]
struct StoreState {
    next_id: i64,
    records: BTreeMap<i64, ShortUrl>,
    recyclable: BTreeSet<i64>,
}

/// In-memory stand-in for the PostgreSQL repository.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    state: Mutex<StoreState>,
    get_calls: AtomicUsize,
}

impl InMemoryUrlRepository {
    /// Number of point lookups served, for cache-aside assertions.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Test-only direct insert of a record with an arbitrary expiry.
    pub fn insert_with_expiry(&self, url: &str, expire_at: DateTime<Utc>) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.records.insert(
            id,
            ShortUrl {
                id,
                url: url.to_string(),
                created_at: Utc::now().trunc_subsecs(0),
                expire_at,
                is_deleted: false,
            },
        );
        id
    }

    pub fn record(&self, id: i64) -> Option<ShortUrl> {
        self.state.lock().unwrap().records.get(&id).cloned()
    }

    pub fn is_recyclable(&self, id: i64) -> bool {
        self.state.lock().unwrap().recyclable.contains(&id)
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut state = self.state.lock().unwrap();

        let recycled = state.recyclable.iter().next().copied();
        let id = match recycled {
            Some(id) => {
                state.recyclable.remove(&id);
                id
            }
            None => {
                state.next_id += 1;
                state.next_id
            }
        };

        let short_url = ShortUrl {
            id,
            url: new_short_url.url,
            created_at: Utc::now().trunc_subsecs(0),
            expire_at: new_short_url.expire_at,
            is_deleted: false,
        };
        state.records.insert(id, short_url.clone());

        Ok(short_url)
    }

    async fn get(&self, id: i64) -> Result<Option<ShortUrl>, AppError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().unwrap().records.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();

        if state.recyclable.contains(&id) {
            return Ok(());
        }

        match state.records.get_mut(&id) {
            Some(record) => record.is_deleted = true,
            None => {
                return Err(AppError::not_found(
                    "Short URL not found",
                    json!({ "id": id }),
                ));
            }
        }
        state.recyclable.insert(id);
        Ok(())
    }

    async fn expire(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();

        if state.recyclable.contains(&id) {
            return Ok(());
        }

        match state.records.get_mut(&id) {
            Some(record) if record.expire_at < Utc::now() => record.is_deleted = true,
            _ => {
                return Err(AppError::not_found(
                    "No expired short URL to retire",
                    json!({ "id": id }),
                ));
            }
        }
        state.recyclable.insert(id);
        Ok(())
    }

    async fn expired_ids(&self) -> Result<mpsc::Receiver<i64>, AppError> {
        let now = Utc::now();
        let ids: Vec<i64> = {
            let state = self.state.lock().unwrap();
            state
                .records
                .values()
                .filter(|r| r.expire_at < now && !r.is_deleted)
                .map(|r| r.id)
                .collect()
        };

        let (tx, rx) = mpsc::channel(ids.len().max(1));
        for id in ids {
            let _ = tx.try_send(id);
        }
        Ok(rx)
    }

    async fn ping(&self) -> bool {
        true
    }
}

/// In-memory stand-in for the Redis cache. Entries never expire on their
/// own; tests simulate TTL eviction through `evict` or [`Self::clear`].
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<i64, CacheEntry>>,
}

impl InMemoryCache {
    /// Drops every entry, simulating TTL expiry of the whole cache.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn entry(&self, id: i64) -> Option<CacheEntry> {
        self.entries.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, id: i64) -> CacheResult<Option<CacheEntry>> {
        Ok(self.entries.lock().unwrap().get(&id).cloned())
    }

    async fn set(&self, id: i64, entry: &CacheEntry, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        self.entries.lock().unwrap().insert(id, entry.clone());
        Ok(())
    }

    async fn evict(&self, id: i64) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Builds an [`AppState`] backed by fresh in-memory fakes.
pub fn build_state() -> (AppState, Arc<InMemoryUrlRepository>, Arc<InMemoryCache>) {
    let repository = Arc::new(InMemoryUrlRepository::default());
    let cache = Arc::new(InMemoryCache::default());

    let repository_dyn: Arc<dyn UrlRepository> = repository.clone();
    let cache_dyn: Arc<dyn CacheStore> = cache.clone();

    let shorten_service = Arc::new(ShortenService::new(
        repository_dyn.clone(),
        cache_dyn.clone(),
    ));
    let redirect_service = Arc::new(RedirectService::new(
        repository_dyn.clone(),
        cache_dyn.clone(),
    ));

    let state = AppState::new(
        shorten_service,
        redirect_service,
        repository_dyn,
        cache_dyn,
        BASE_URL.to_string(),
    );

    (state, repository, cache)
}
