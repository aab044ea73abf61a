//! Core domain entities.
//!
//! The service persists a single entity: the [`Link`] record pairing an alias
//! with its target URL. [`NewLink`] is the creation input; records are never
//! updated, only deleted.

pub mod link;

pub use link::{Link, NewLink, RESERVED_ALIASES, is_reserved_alias};
