//! Background sweep of expired short URL records.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant};
use tracing::{debug, error, info};

use crate::domain::repositories::UrlRepository;

/// Periodically retires expired records into the recyclable pool.
///
/// Runs until `shutdown` changes (or its sender is dropped). The signal is
/// observed between ticks only: a sweep that is already underway finishes
/// before the loop exits. Completion is signalled to the spawner through the
/// task's `JoinHandle`.
pub async fn run_sweeper(
    repository: Arc<dyn UrlRepository>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Sweeper started, checking expired records every {:?}", period);
    let mut ticker = time::interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                info!("Sweeper received shutdown signal, exiting");
                return;
            }
            _ = ticker.tick() => sweep(repository.as_ref()).await,
        }
    }
}

/// One sweep pass: scan for expired ids and retire each one.
///
/// Per-id failures are logged and skipped; a failure to start the scan is
/// logged and left for the next tick.
async fn sweep(repository: &dyn UrlRepository) {
    debug!("Checking for expired records");
    let mut ids = match repository.expired_ids().await {
        Ok(receiver) => receiver,
        Err(e) => {
            error!("Failed to scan for expired records: {:?}", e);
            return;
        }
    };

    let mut retired = 0usize;
    while let Some(id) = ids.recv().await {
        match repository.expire(id).await {
            Ok(()) => retired += 1,
            Err(e) => error!("Failed to retire expired record {}: {:?}", id, e),
        }
    }

    if retired > 0 {
        info!("Retired {} expired records", retired);
    }
}
