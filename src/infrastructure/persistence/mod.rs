//! SQLite repository implementations.
//!
//! - [`SqliteLinkRepository`] - Link storage and retrieval
//! - [`pool`] - Connection pool setup and embedded migrations

pub mod pool;
pub mod sqlite_link_repository;

pub use pool::{PoolSettings, connect_pool, run_migrations};
pub use sqlite_link_repository::{DEFAULT_STORAGE_TIMEOUT, SqliteLinkRepository};
