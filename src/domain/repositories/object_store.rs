//! Remote object store capability used to re-host uploaded files.

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

/// Failure of a single remote store call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The call did not complete within the configured timeout.
    #[error("timed out after {0}s")]
    Timeout(u64),

    /// Connection, TLS or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The store answered 2xx but the body was not what we expected.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Where the bytes of a file should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Path of the object inside the store (e.g. `app:/report.pdf`).
    pub path: String,
    /// Pre-signed URL accepting the file body.
    pub href: String,
}

/// Black-box remote store: "upload bytes, get back a retrievable URL".
///
/// The three calls map one-to-one onto the per-file pipeline steps and are
/// always issued in this order for a given file.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::DiskStore`] - REST disk API client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Requests a write target for `filename`, overwriting any prior object
    /// with the same name.
    async fn request_upload_target(&self, filename: &str) -> Result<UploadTarget, StoreError>;

    /// Sends the file body to `target` and returns the stored object's location.
    async fn transfer(&self, target: &UploadTarget, content: Bytes) -> Result<String, StoreError>;

    /// Requests a stable download URL for the object at `location`.
    async fn request_download_link(&self, location: &str) -> Result<String, StoreError>;

    /// Returns true if the store is configured for use.
    fn is_configured(&self) -> bool;
}
