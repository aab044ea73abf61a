//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Alias assignment policy lives in
//! [`crate::application::services::LinkService`].

pub mod entities;
pub mod repositories;
