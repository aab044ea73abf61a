//! API route configuration.
//!
//! Link creation and removal go through [`crate::api::middleware::auth`];
//! redirects and the health check are public.

use crate::api::handlers::{delete_handler, health_handler, redirect_handler, save_handler};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST   /url`       - Create a short link (auth)
/// - `GET    /health`    - Storage health check
/// - `GET    /{alias}`   - Redirect to the stored URL
/// - `DELETE /{alias}`   - Remove a short link (auth)
pub fn routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth::layer);

    Router::new()
        .route("/url", post(save_handler).route_layer(auth.clone()))
        .route("/health", get(health_handler))
        .route(
            "/{alias}",
            get(redirect_handler).merge(delete(delete_handler).route_layer(auth)),
        )
}
