//! Common response envelope.

use serde::{Deserialize, Serialize};

/// Outcome marker carried by every JSON response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// Response envelope: `{"status": "OK", "alias": "..."}` on success,
/// `{"status": "Error", "error": "..."}` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ApiResponse {
    pub fn ok(alias: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            error: None,
            alias: Some(alias.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(message.into()),
            alias: None,
        }
    }
}
