//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, sweeper spawning, and Axum
//! server lifecycle.

use crate::api::routes::app_router;
use crate::application::services::{RedirectService, ShortenService};
use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::domain::sweeper::run_sweeper;
use crate::infrastructure::cache::{CacheStore, NullCache, RedisCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::state::AppState;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Redis cache (or NullCache fallback)
/// - Background expiry sweeper
/// - Axum HTTP server
///
/// On shutdown (ctrl-c) the sweeper is cancelled and awaited before the
/// process exits.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheStore> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    let shorten_service = Arc::new(ShortenService::new(repository.clone(), cache.clone()));
    let redirect_service = Arc::new(RedirectService::new(repository.clone(), cache.clone()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = tokio::spawn(run_sweeper(
        repository.clone(),
        Duration::from_secs(config.sweep_interval_seconds),
        shutdown_rx,
    ));
    tracing::info!("Expiry sweeper started");

    let state = AppState::new(
        shorten_service,
        redirect_service,
        repository,
        cache,
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the sweeper and wait for it before exiting.
    let _ = shutdown_tx.send(true);
    sweeper.await?;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
