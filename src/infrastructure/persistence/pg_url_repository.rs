//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Buffer size for the expired-id scan channel. Bounds how far the cursor
/// can run ahead of the consumer.
const EXPIRED_SCAN_BUFFER: usize = 64;

/// PostgreSQL repository for short URL storage and retirement.
///
/// Identifier allocation relies on the database alone: a `BIGSERIAL` for
/// fresh ids and `FOR UPDATE SKIP LOCKED` on the recyclable pool so that
/// concurrent creators claim distinct recycled ids without blocking each
/// other.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut tx = self.pool.begin().await?;

        // Claim one recyclable id if any is free; rows locked by concurrent
        // creators are skipped, so claimants never wait on each other.
        let recycled: Option<i64> =
            sqlx::query_scalar("SELECT id FROM recyclable_urls LIMIT 1 FOR UPDATE SKIP LOCKED")
                .fetch_optional(&mut *tx)
                .await?;

        let short_url = match recycled {
            Some(id) => {
                sqlx::query("DELETE FROM recyclable_urls WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                sqlx::query_as::<_, ShortUrl>(
                    r#"
                    UPDATE short_urls
                    SET url = $1, created_at = date_trunc('second', now()),
                        expire_at = $2, is_deleted = false
                    WHERE id = $3
                    RETURNING id, url, created_at, expire_at, is_deleted
                    "#,
                )
                .bind(&new_short_url.url)
                .bind(new_short_url.expire_at)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<_, ShortUrl>(
                    r#"
                    INSERT INTO short_urls (url, expire_at)
                    VALUES ($1, $2)
                    RETURNING id, url, created_at, expire_at, is_deleted
                    "#,
                )
                .bind(&new_short_url.url)
                .bind(new_short_url.expire_at)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(short_url)
    }

    async fn get(&self, id: i64) -> Result<Option<ShortUrl>, AppError> {
        let short_url = sqlx::query_as::<_, ShortUrl>(
            "SELECT id, url, created_at, expire_at, is_deleted FROM short_urls WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(short_url)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Already retired: idempotent success.
        let recyclable: Option<i64> =
            sqlx::query_scalar("SELECT id FROM recyclable_urls WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if recyclable.is_some() {
            tx.commit().await?;
            return Ok(());
        }

        let live: Option<i64> =
            sqlx::query_scalar("SELECT id FROM short_urls WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if live.is_none() {
            return Err(AppError::not_found(
                "Short URL not found",
                json!({ "id": id }),
            ));
        }

        retire(&mut tx, id).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn expire(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let recyclable: Option<i64> =
            sqlx::query_scalar("SELECT id FROM recyclable_urls WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if recyclable.is_some() {
            tx.commit().await?;
            return Ok(());
        }

        // The expiry guard protects against racing a concurrent create that
        // just revived this id with a fresh expiry.
        let expired: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM short_urls WHERE id = $1 AND expire_at < now() FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if expired.is_none() {
            return Err(AppError::not_found(
                "No expired short URL to retire",
                json!({ "id": id }),
            ));
        }

        retire(&mut tx, id).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn expired_ids(&self) -> Result<mpsc::Receiver<i64>, AppError> {
        // Acquiring the connection up front makes "scan could not start"
        // observable to the caller; everything after that is best-effort.
        let mut conn = self.pool.acquire().await?;
        let (tx, rx) = mpsc::channel(EXPIRED_SCAN_BUFFER);

        tokio::spawn(async move {
            let mut rows = sqlx::query_scalar::<_, i64>(
                "SELECT id FROM short_urls WHERE expire_at < now() AND is_deleted = false",
            )
            .fetch(&mut *conn);

            while let Some(row) = rows.next().await {
                match row {
                    Ok(id) => {
                        // Receiver dropped: consumer stopped early, close the
                        // cursor by bailing out.
                        if tx.send(id).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Expired-id scan truncated: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}

/// Marks a live row deleted and inserts its id into the recyclable pool.
/// Runs inside the caller's transaction; the caller commits or rolls back.
async fn retire(tx: &mut sqlx::Transaction<'_, sqlx::Postgres>, id: i64) -> Result<(), AppError> {
    sqlx::query("UPDATE short_urls SET is_deleted = true WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    sqlx::query("INSERT INTO recyclable_urls (id) VALUES ($1)")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
