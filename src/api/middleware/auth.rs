//! HTTP Basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;

use crate::{error::AppError, state::AppState};

/// Authenticates requests with HTTP Basic credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic <base64(user:password)>
/// ```
///
/// When no credentials are configured the request passes through untouched.
///
/// # Errors
///
/// Returns `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge if the
/// header is missing, malformed, or carries the wrong credentials.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/url", post(save_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = st.basic_auth.as_deref() else {
        return Ok(next.run(req).await);
    };

    let (mut parts, body) = req.into_parts();

    let AuthBasic((user, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::Unauthorized)?;

    if !expected.matches(&user, password.as_deref().unwrap_or_default()) {
        tracing::warn!(user = %user, "rejected credentials");
        return Err(AppError::Unauthorized);
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
