//! DTOs for the short link API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/id/`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortLinkRequest {
    /// The original URL to shorten.
    #[validate(required(message = "\"url\" is a required field"))]
    pub url: Option<String>,

    /// Optional user-chosen code. `null` and `""` both mean "generate one".
    #[serde(default)]
    pub custom_id: Option<String>,
}

impl CreateShortLinkRequest {
    /// The custom code to use, if any.
    pub fn custom_code(&self) -> Option<&str> {
        self.custom_id.as_deref().filter(|code| !code.is_empty())
    }
}

/// Response of `POST /api/id/`.
#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    pub url: String,
    pub short_link: String,
}

/// Response of `GET /api/id/{short_id}/`.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}
