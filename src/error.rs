//! HTTP-facing error type.
//!
//! Every failure is rendered as the structured payload
//! `{"status": "Error", "error": "..."}`. Duplicate aliases and validation
//! failures are reported with `200 OK`, matching the long-standing client
//! contract.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::api::dto::response::ApiResponse;
use crate::application::services::LinkError;

pub const MSG_NOT_FOUND: &str = "url not found";
pub const MSG_ALIAS_EXISTS: &str = "url with this alias already exists";
pub const MSG_INTERNAL: &str = "internal error";
pub const MSG_UNAUTHORIZED: &str = "unauthorized";
pub const MSG_INVALID_BODY: &str = "invalid request body";

#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    NotFound,
    Conflict { alias: String },
    Unauthorized,
    /// `reason` is for logs only and never sent to the client.
    Internal { reason: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Validation { message } => (StatusCode::OK, message.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, MSG_NOT_FOUND.to_string()),
            AppError::Conflict { .. } => (StatusCode::OK, MSG_ALIAS_EXISTS.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, MSG_UNAUTHORIZED.to_string()),
            AppError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            AppError::Internal { reason } => tracing::error!(reason = %reason, "request failed"),
            AppError::Conflict { alias } => tracing::warn!(alias = %alias, "alias already exists"),
            _ => {}
        }

        let mut response = (status, Json(ApiResponse::error(message))).into_response();

        if matches!(self, AppError::Unauthorized) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"url-alias\""),
            );
        }

        response
    }
}

impl From<LinkError> for AppError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::NotFound => AppError::NotFound,
            LinkError::Conflict(alias) => AppError::Conflict { alias },
            LinkError::Exhausted { .. } | LinkError::Unavailable(_) | LinkError::Internal(_) => {
                AppError::internal(e.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request(validation_message(&errors))
    }
}

/// Builds a readable summary such as
/// `validation failed: field url is not a valid URL`.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => errs.first().map(|err| match err.code.as_ref() {
                "required" => format!("field {field} is a required field"),
                "url" => format!("field {field} is not a valid URL"),
                _ => match &err.message {
                    Some(message) => format!("field {field} {message}"),
                    None => format!("field {field} is not valid"),
                },
            }),
            _ => None,
        })
        .collect();

    fields.sort();

    if fields.is_empty() {
        "validation failed".to_string()
    } else {
        format!("validation failed: {}", fields.join(", "))
    }
}
