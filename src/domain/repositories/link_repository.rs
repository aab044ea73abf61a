//! Repository trait for link storage.

use crate::domain::entities::{Link, NewLink};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a [`LinkRepository`].
///
/// The store only ever reports these three kinds; policy errors such as
/// conflicts or an exhausted retry budget belong to the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("url not found")]
    NotFound,

    #[error("alias already exists: {0}")]
    AliasExists(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Unavailable(other.to_string()),
        }
    }
}

/// Repository interface for link records.
///
/// Two independent lookup paths (by alias, by URL) over a single table with a
/// unique constraint on `alias`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new record and returns its id.
    ///
    /// The uniqueness check and the insert are one atomic statement.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AliasExists`] if a live record already uses the alias.
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn save(&self, new_link: NewLink) -> Result<i64, StorageError>;

    /// Returns the target URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no live record has that alias.
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn get_url(&self, alias: &str) -> Result<String, StorageError>;

    /// Returns the alias of the oldest record targeting `url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record targets that URL.
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn get_alias_by_url(&self, url: &str) -> Result<String, StorageError>;

    /// Removes the record stored under `alias`, freeing the alias for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no live record has that alias.
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn delete(&self, alias: &str) -> Result<(), StorageError>;

    /// Lists the most recently created records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn list(&self, limit: i64) -> Result<Vec<Link>, StorageError>;

    /// Counts live records.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn count(&self) -> Result<i64, StorageError>;
}
