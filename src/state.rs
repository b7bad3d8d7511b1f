use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenService};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheStore;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub redirect_service: Arc<RedirectService>,
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheStore>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        shorten_service: Arc<ShortenService>,
        redirect_service: Arc<RedirectService>,
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheStore>,
        base_url: String,
    ) -> Self {
        Self {
            shorten_service,
            redirect_service,
            repository,
            cache,
            base_url,
        }
    }
}
