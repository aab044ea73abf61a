//! Link entity representing a stored alias → URL mapping.

use sqlx::FromRow;

/// Aliases that would be shadowed by fixed routes.
pub const RESERVED_ALIASES: &[&str] = &["url", "health"];

/// Returns true when `alias` collides with a fixed route.
pub fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}

/// A persisted link record.
///
/// `id` is assigned by the store and never reused; `alias` is unique among
/// live records and immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Link {
    pub id: i64,
    pub alias: String,
    pub url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, alias: String, url: String) -> Self {
        Self { id, alias, url }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub alias: String,
    pub url: String,
}

impl NewLink {
    pub fn new(url: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            url: url.into(),
        }
    }
}
