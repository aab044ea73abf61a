//! SQLite implementation of link repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StorageError};
use crate::utils::db_error::is_unique_violation;

/// Default deadline applied to every storage call.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(4);

/// SQLite repository for link storage and retrieval.
///
/// Alias uniqueness is enforced by the `UNIQUE` constraint on `url.alias`, so
/// concurrent inserts of the same alias are serialized by the database and
/// exactly one succeeds.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
    timeout: Duration,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self::with_timeout(pool, DEFAULT_STORAGE_TIMEOUT)
    }

    /// Creates a repository whose calls fail with
    /// [`StorageError::Unavailable`] once `timeout` elapses.
    pub fn with_timeout(pool: Arc<SqlitePool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Runs `fut` under the configured deadline.
    async fn deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<Result<T, sqlx::Error>, StorageError> {
        tokio::time::timeout(self.timeout, fut).await.map_err(|_| {
            StorageError::Unavailable(format!(
                "storage call exceeded {}ms",
                self.timeout.as_millis()
            ))
        })
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn save(&self, new_link: NewLink) -> Result<i64, StorageError> {
        let result = self
            .deadline(
                sqlx::query("INSERT INTO url (alias, url) VALUES (?, ?)")
                    .bind(&new_link.alias)
                    .bind(&new_link.url)
                    .execute(self.pool.as_ref()),
            )
            .await?;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) => Err(StorageError::AliasExists(new_link.alias)),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_url(&self, alias: &str) -> Result<String, StorageError> {
        let url: Option<String> = self
            .deadline(
                sqlx::query_scalar("SELECT url FROM url WHERE alias = ?")
                    .bind(alias)
                    .fetch_optional(self.pool.as_ref()),
            )
            .await??;

        url.ok_or(StorageError::NotFound)
    }

    async fn get_alias_by_url(&self, url: &str) -> Result<String, StorageError> {
        let alias: Option<String> = self
            .deadline(
                sqlx::query_scalar("SELECT alias FROM url WHERE url = ? ORDER BY id LIMIT 1")
                    .bind(url)
                    .fetch_optional(self.pool.as_ref()),
            )
            .await??;

        alias.ok_or(StorageError::NotFound)
    }

    async fn delete(&self, alias: &str) -> Result<(), StorageError> {
        let done = self
            .deadline(
                sqlx::query("DELETE FROM url WHERE alias = ?")
                    .bind(alias)
                    .execute(self.pool.as_ref()),
            )
            .await??;

        if done.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<Link>, StorageError> {
        let links = self
            .deadline(
                sqlx::query_as::<_, Link>(
                    "SELECT id, alias, url FROM url ORDER BY id DESC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(self.pool.as_ref()),
            )
            .await??;

        Ok(links)
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let count: i64 = self
            .deadline(
                sqlx::query_scalar("SELECT COUNT(*) FROM url").fetch_one(self.pool.as_ref()),
            )
            .await??;

        Ok(count)
    }
}
