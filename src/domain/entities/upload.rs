//! Transient values produced while re-hosting uploaded files.

use axum::body::Bytes;

use super::ShortLink;

/// A named file received from a client, ready to be pushed to the object store.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub filename: String,
    pub content: Bytes,
}

impl FilePayload {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Per-file result of the ingestion pipeline. Never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    /// The file is stored remotely and reachable at `target_url`.
    Uploaded { filename: String, target_url: String },
    /// One of the pipeline steps failed for this file.
    Failed { filename: String, reason: String },
}

impl UploadResult {
    pub fn filename(&self) -> &str {
        match self {
            UploadResult::Uploaded { filename, .. } | UploadResult::Failed { filename, .. } => {
                filename
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadResult::Uploaded { .. })
    }
}

/// Final per-file outcome once successful uploads have been given short codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Shortened { filename: String, link: ShortLink },
    Failed { filename: String, reason: String },
}

impl FileOutcome {
    pub fn filename(&self) -> &str {
        match self {
            FileOutcome::Shortened { filename, .. } | FileOutcome::Failed { filename, .. } => {
                filename
            }
        }
    }
}
