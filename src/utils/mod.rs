//! Utility functions used across the application.
//!
//! - [`alias_generator`] - Candidate alias generation
//! - [`db_error`] - Database error classification

pub mod alias_generator;
pub mod db_error;
