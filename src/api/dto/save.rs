//! DTOs for the link creation endpoint.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::domain::entities::is_reserved_alias;

/// Characters allowed in a caller-supplied alias.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias pattern is valid"));

/// Longest alias a caller may request.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Request body for `POST /url`.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// The URL to shorten.
    #[validate(required, url, custom(function = "validate_url_chars"))]
    pub url: Option<String>,

    /// Optional alias; empty or absent means "generate one".
    #[validate(custom(function = "validate_alias"))]
    pub alias: Option<String>,
}

impl SaveRequest {
    /// Requested alias, with an empty string treated as absent.
    pub fn requested_alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|alias| !alias.is_empty())
    }
}

/// Rejects ASCII control characters, which the URL parser silently strips
/// but a `Location` header cannot carry.
fn validate_url_chars(url: &str) -> Result<(), ValidationError> {
    if url.chars().any(|c| c.is_ascii_control()) {
        return Err(ValidationError::new("control")
            .with_message("must not contain control characters".into()));
    }

    Ok(())
}

fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    if alias.is_empty() {
        return Ok(());
    }

    if alias.len() > MAX_ALIAS_LENGTH {
        return Err(ValidationError::new("length").with_message("is too long".into()));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(ValidationError::new("alias")
            .with_message("may only contain letters, digits, '-' and '_'".into()));
    }

    if is_reserved_alias(alias) {
        return Err(ValidationError::new("reserved").with_message("is reserved".into()));
    }

    Ok(())
}
