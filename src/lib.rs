//! # URL Alias
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and the storage contract
//! - **Application Layer** ([`application`]) - Link creation, resolution and removal
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite storage
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Idempotent link creation: the same URL always maps to the same alias
//! - Custom aliases or random ones drawn from `a-z`
//! - Bounded retries when a generated alias collides
//! - Optional HTTP basic auth for write endpoints
//! - Structured logging with per-request ids
//!
//! ## Quick Start
//!
//! ```bash
//! export STORAGE_PATH="./storage/storage.db"
//! export HTTP_USER="admin"          # Optional
//! export HTTP_PASSWORD="secret"     # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkError, LinkService};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::repositories::{LinkRepository, StorageError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::utils::alias_generator::{AliasGenerator, RandomAliasGenerator};
}
