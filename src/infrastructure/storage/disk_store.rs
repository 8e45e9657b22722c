//! REST cloud-disk client implementing [`ObjectStore`].
//!
//! Speaks the Yandex Disk style API:
//!
//! 1. `GET {api}/resources/upload?path=app:/<name>&overwrite=true` → `{ "href": ... }`
//! 2. `PUT <href>` with the file body; the `Location` header names the stored object
//! 3. `GET {api}/resources/download?path=<location>` → `{ "href": ... }`

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use percent_encoding::percent_decode_str;
use reqwest::header::{AUTHORIZATION, LOCATION};
use serde::Deserialize;

use crate::domain::repositories::{ObjectStore, StoreError, UploadTarget};

/// Default API root of the cloud disk.
pub const DEFAULT_API_URL: &str = "https://cloud-api.yandex.net/v1/disk";

/// Prefix under which uploaded files are stored.
const APP_FOLDER: &str = "app:/";

#[derive(Debug, Deserialize)]
struct HrefResponse {
    href: String,
}

/// HTTP client for the cloud disk REST API.
///
/// Every request is bounded by the client-wide timeout given at construction.
#[derive(Clone)]
pub struct DiskStore {
    http: reqwest::Client,
    api_url: String,
    token: String,
    timeout: Duration,
}

impl DiskStore {
    /// Builds a client for `api_url` authenticating with an OAuth `token`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the HTTP client cannot be built.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.token)
    }

    fn map_transport(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(self.timeout.as_secs())
        } else {
            StoreError::Transport(e.to_string())
        }
    }

    async fn ensure_success(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_href(&self, request: reqwest::RequestBuilder) -> Result<String, StoreError> {
        let response = request
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let response = self.ensure_success(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport(e))?;

        let parsed: HrefResponse = serde_json::from_str(&body)
            .map_err(|e| StoreError::InvalidResponse(format!("missing href: {e}")))?;

        Ok(parsed.href)
    }
}

/// Turns a `Location` header into a disk path usable by the download endpoint.
///
/// The header is percent-encoded and prefixed with `/disk`.
pub fn location_to_path(location: &str) -> String {
    let decoded = percent_decode_str(location).decode_utf8_lossy();
    decoded
        .strip_prefix("/disk")
        .unwrap_or(&*decoded)
        .to_string()
}

#[async_trait]
impl ObjectStore for DiskStore {
    async fn request_upload_target(&self, filename: &str) -> Result<UploadTarget, StoreError> {
        let path = format!("{APP_FOLDER}{filename}");

        let href = self
            .fetch_href(
                self.http
                    .get(self.endpoint("resources/upload"))
                    .query(&[("path", path.as_str()), ("overwrite", "true")]),
            )
            .await?;

        Ok(UploadTarget { path, href })
    }

    async fn transfer(&self, target: &UploadTarget, content: Bytes) -> Result<String, StoreError> {
        let response = self
            .http
            .put(&target.href)
            .body(content)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let response = self.ensure_success(response).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(location_to_path)
            .unwrap_or_else(|| target.path.clone());

        Ok(location)
    }

    async fn request_download_link(&self, location: &str) -> Result<String, StoreError> {
        self.fetch_href(
            self.http
                .get(self.endpoint("resources/download"))
                .query(&[("path", location)]),
        )
        .await
    }

    fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }
}
