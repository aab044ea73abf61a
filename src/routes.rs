//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /url`     - Create a short link (basic auth when configured)
//! - `GET    /health`  - Health check (public)
//! - `GET    /{alias}` - Redirect (public)
//! - `DELETE /{alias}` - Remove a short link (basic auth when configured)
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Path normalization** - Trailing slash handling
//! - **Request ID** - Assigns `x-request-id` when the client sent none
//! - **Tracing** - Structured request/response logging
//! - **Request ID propagation** - Echoes `x-request-id` on the response
//! - **Panic recovery** - Turns handler panics into `500 internal error`

use crate::api;
use crate::api::middleware::{recover, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::routes(state.clone()))
        .with_state(state)
        .layer(recover::layer())
        .layer(tracing::propagate_request_id_layer())
        .layer(tracing::layer())
        .layer(tracing::set_request_id_layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
