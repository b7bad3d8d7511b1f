//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Repository interface for the authoritative short URL store.
///
/// The store is the sole source of truth for identifier allocation, lookup
/// and retirement. All mutual exclusion between concurrent callers happens
/// inside the store's transactions; the cache layer is never used for
/// exclusion.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Creates a new short URL record, recycling a retired id when one is
    /// available.
    ///
    /// Runs in a single transaction: either a recyclable id is claimed (with
    /// skip-locked semantics, so concurrent creators never contend for the
    /// same candidate) and its row overwritten, or a fresh row is inserted.
    /// Two concurrent calls never receive the same id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors; the transaction is
    /// rolled back and no partial allocation is ever visible.
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Point lookup by id, unconditioned on liveness.
    ///
    /// Deleted and expired rows are returned as-is; filtering them is the
    /// caller's responsibility so that cached and uncached reads share one
    /// liveness check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get(&self, id: i64) -> Result<Option<ShortUrl>, AppError>;

    /// Soft-deletes the record and moves its id into the recyclable pool.
    ///
    /// Idempotent: an id already in the pool is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id has no live row, and
    /// [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Retires an expired record into the recyclable pool.
    ///
    /// Same shape as [`Self::delete`], but the live-row confirmation
    /// additionally requires `expire_at` to have passed, guarding against a
    /// race with a concurrent create that revived the id. Used by the expiry
    /// sweeper.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if there is no matching expired row,
    /// and [`AppError::Internal`] on database errors.
    async fn expire(&self, id: i64) -> Result<(), AppError>;

    /// Streams the ids of expired-but-still-live records.
    ///
    /// The result is fed from a server-side cursor: finite, single-pass, not
    /// restartable. Dropping the receiver stops the scan and releases the
    /// cursor. A scan error mid-stream silently truncates the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the scan cannot be started.
    async fn expired_ids(&self) -> Result<mpsc::Receiver<i64>, AppError>;

    /// Reports whether the backing store is reachable.
    async fn ping(&self) -> bool;
}
