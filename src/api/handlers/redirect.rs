//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// Responds with `302 Found` and the stored URL in `Location`, byte for byte.
///
/// # Errors
///
/// Returns 404 Not Found if the alias is not assigned.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.link_service.resolve_short_link(&alias).await?;

    let location = HeaderValue::try_from(url.as_str())
        .map_err(|e| AppError::internal(format!("stored url is not a valid header: {e}")))?;

    info!(alias = %alias, url = %url, "got url");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
