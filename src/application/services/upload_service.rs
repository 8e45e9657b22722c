//! File re-hosting: upload a batch, then give every uploaded file a short link.

use std::sync::Arc;

use futures::future::join_all;
use tracing::warn;

use super::ingestion::IngestionPipeline;
use super::link_service::LinkService;
use crate::domain::entities::{FileOutcome, FilePayload, UploadResult};

/// Combines the [`IngestionPipeline`] with the allocator.
///
/// Only successful uploads become records. If storing the record fails after
/// the remote upload succeeded, the file is reported as failed and the
/// orphaned remote object is left in place (logged, not deleted).
pub struct UploadService {
    pipeline: IngestionPipeline,
    links: Arc<LinkService>,
}

impl UploadService {
    pub fn new(pipeline: IngestionPipeline, links: Arc<LinkService>) -> Self {
        Self { pipeline, links }
    }

    pub fn pipeline(&self) -> &IngestionPipeline {
        &self.pipeline
    }

    /// Uploads `files` and allocates a short code for each successful upload.
    ///
    /// Returns one outcome per input file, in input order.
    pub async fn upload_and_shorten(&self, files: Vec<FilePayload>) -> Vec<FileOutcome> {
        let results = self.pipeline.ingest(files).await;

        join_all(results.into_iter().map(|result| self.persist(result))).await
    }

    async fn persist(&self, result: UploadResult) -> FileOutcome {
        match result {
            UploadResult::Uploaded {
                filename,
                target_url,
            } => match self.links.create_short_link(&target_url, None).await {
                Ok(link) => FileOutcome::Shortened { filename, link },
                Err(e) => {
                    warn!(
                        filename = %filename,
                        orphaned_url = %target_url,
                        error = %e,
                        "Uploaded file could not be given a short link"
                    );
                    FileOutcome::Failed {
                        filename,
                        reason: format!("persist: {e}"),
                    }
                }
            },
            UploadResult::Failed { filename, reason } => FileOutcome::Failed { filename, reason },
        }
    }
}
