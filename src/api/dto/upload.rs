//! DTOs for the file upload endpoint.

use serde::Serialize;

/// Response of `POST /files`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub summary: BatchSummary,
    pub items: Vec<UploadResultItem>,
}

/// Per-file result, in the order the files were sent.
///
/// Uses untagged enum for cleaner JSON structure (no discriminator field).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadResultItem {
    Success { filename: String, short_link: String },
    Error { filename: String, error: String },
}

/// Summary counts for the batch.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}
