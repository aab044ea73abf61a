//! Handler for link creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{info, warn};
use validator::Validate;

use crate::api::dto::response::ApiResponse;
use crate::api::dto::save::SaveRequest;
use crate::error::{AppError, MSG_INVALID_BODY};
use crate::state::AppState;

/// Creates a short alias for a URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "my-link" }
/// ```
///
/// `alias` is optional. Without it, a URL that is already stored returns its
/// existing alias; otherwise a random one is generated.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "my-link" }
/// ```
///
/// # Errors
///
/// - Malformed body or failed validation: 200 with `status: "Error"`
/// - Alias already taken: 200 with `status: "Error"`
/// - Storage failure: 500
pub async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "failed to decode request body");
        AppError::bad_request(MSG_INVALID_BODY)
    })?;

    if let Err(errors) = payload.validate() {
        warn!(error = %errors, "request validation failed");
        return Err(errors.into());
    }

    let url = payload.url.as_deref().unwrap_or_default();

    let alias = state
        .link_service
        .create_short_link(url, payload.requested_alias())
        .await?;

    info!(alias = %alias, "url added");

    Ok(Json(ApiResponse::ok(alias)))
}
