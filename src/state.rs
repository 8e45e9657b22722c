//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, UploadService};

/// Services and request-independent settings shared across handlers.
///
/// Cheap to clone: services are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub upload_service: Arc<UploadService>,
    /// Public root for short links; `None` derives it from the `Host` header.
    pub base_url: Option<String>,
    pub max_upload_files: usize,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        upload_service: Arc<UploadService>,
        base_url: Option<String>,
        max_upload_files: usize,
    ) -> Self {
        Self {
            link_service,
            upload_service,
            base_url,
            max_upload_files,
        }
    }
}
