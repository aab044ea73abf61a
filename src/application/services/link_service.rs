//! Link creation, resolution and removal service.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink, is_reserved_alias};
use crate::domain::repositories::{LinkRepository, StorageError};
use crate::utils::alias_generator::AliasGenerator;

/// Maximum number of generated candidates probed before giving up.
pub const MAX_ALIAS_ATTEMPTS: usize = 10;

/// Failures surfaced by [`LinkService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("url not found")]
    NotFound,

    /// The alias is held by another record, either because the caller asked
    /// for a taken alias or because a concurrent creator won the insert.
    #[error("url with this alias already exists: {0}")]
    Conflict(String),

    #[error("no free alias found after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for LinkError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => Self::NotFound,
            StorageError::AliasExists(alias) => Self::Conflict(alias),
            StorageError::Unavailable(reason) => Self::Unavailable(reason),
        }
    }
}

/// Service for creating, resolving and removing short links.
///
/// Shared behind an `Arc` across concurrent requests.
pub struct LinkService<L: LinkRepository, G: AliasGenerator> {
    link_repository: Arc<L>,
    generator: Arc<G>,
    alias_length: usize,
}

impl<L: LinkRepository, G: AliasGenerator> LinkService<L, G> {
    /// Creates a new link service producing aliases of `alias_length` symbols.
    pub fn new(link_repository: Arc<L>, generator: Arc<G>, alias_length: usize) -> Self {
        Self {
            link_repository,
            generator,
            alias_length,
        }
    }

    /// Length of generated aliases.
    pub fn alias_length(&self) -> usize {
        self.alias_length
    }

    /// Creates a short link for `url` and returns its alias.
    ///
    /// # Idempotence
    ///
    /// Without a requested alias, an existing record for the same URL is
    /// returned as-is and nothing is written. An empty requested alias counts
    /// as absent.
    ///
    /// # Alias assignment
    ///
    /// - A requested alias is used verbatim.
    /// - Otherwise candidates are generated and probed against the store, up to
    ///   [`MAX_ALIAS_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Conflict`] if the alias is taken at insert time.
    /// Returns [`LinkError::Exhausted`] if every generated candidate was taken.
    /// Returns [`LinkError::Internal`] if probing a candidate fails.
    /// Returns [`LinkError::Unavailable`] on other storage failures.
    pub async fn create_short_link(
        &self,
        url: &str,
        requested_alias: Option<&str>,
    ) -> Result<String, LinkError> {
        let requested_alias = requested_alias.filter(|alias| !alias.is_empty());

        if requested_alias.is_none() {
            match self.link_repository.get_alias_by_url(url).await {
                Ok(existing) => {
                    debug!(alias = %existing, "url already shortened");
                    return Ok(existing);
                }
                Err(StorageError::NotFound) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let alias = match requested_alias {
            Some(alias) => alias.to_string(),
            None => self.generate_unique_alias().await?,
        };

        let id = self
            .link_repository
            .save(NewLink::new(url, alias.clone()))
            .await?;

        info!(id, alias = %alias, "link saved");

        Ok(alias)
    }

    /// Returns the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if the alias is not assigned.
    /// Returns [`LinkError::Unavailable`] on storage failures.
    pub async fn resolve_short_link(&self, alias: &str) -> Result<String, LinkError> {
        Ok(self.link_repository.get_url(alias).await?)
    }

    /// Removes the link stored under `alias`, freeing the alias.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if the alias is not assigned.
    /// Returns [`LinkError::Unavailable`] on storage failures.
    pub async fn remove_short_link(&self, alias: &str) -> Result<(), LinkError> {
        self.link_repository.delete(alias).await?;
        info!(alias, "link removed");
        Ok(())
    }

    /// Lists the newest links, most recent first.
    pub async fn list_links(&self, limit: i64) -> Result<Vec<Link>, LinkError> {
        Ok(self.link_repository.list(limit).await?)
    }

    /// Counts stored links. Also serves as a storage round-trip probe.
    pub async fn count_links(&self) -> Result<i64, LinkError> {
        Ok(self.link_repository.count().await?)
    }

    /// Generates a candidate alias not currently held by any record.
    ///
    /// Reserved aliases count as taken.
    ///
    /// The probe is advisory: a concurrent creator may still take the alias
    /// before the insert, which the store reports as a conflict.
    async fn generate_unique_alias(&self) -> Result<String, LinkError> {
        for attempt in 1..=MAX_ALIAS_ATTEMPTS {
            let candidate = self.generator.generate(self.alias_length);

            if is_reserved_alias(&candidate) {
                debug!(attempt, candidate = %candidate, "alias candidate reserved");
                continue;
            }

            match self.link_repository.get_url(&candidate).await {
                Err(StorageError::NotFound) => return Ok(candidate),
                Ok(_) => debug!(attempt, candidate = %candidate, "alias candidate taken"),
                Err(e) => return Err(LinkError::Internal(e.to_string())),
            }
        }

        warn!(
            attempts = MAX_ALIAS_ATTEMPTS,
            alias_length = self.alias_length,
            "alias space exhausted"
        );

        Err(LinkError::Exhausted {
            attempts: MAX_ALIAS_ATTEMPTS,
        })
    }
}
