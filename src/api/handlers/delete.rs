//! Handler for link removal.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

use crate::api::dto::response::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Removes a link, freeing its alias for reuse.
///
/// # Endpoint
///
/// `DELETE /{alias}`
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "my-link" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the alias is not assigned.
pub async fn delete_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse>, AppError> {
    state.link_service.remove_short_link(&alias).await?;

    info!(alias = %alias, "deleted url");

    Ok(Json(ApiResponse::ok(alias)))
}
