//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, panic recovery, and observability middleware.

pub mod auth;
pub mod recover;
pub mod tracing;
