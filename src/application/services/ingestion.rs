//! Concurrent multi-file upload to the remote object store.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::domain::entities::{FilePayload, UploadResult};
use crate::domain::repositories::{ObjectStore, StoreError};

/// The three remote round-trips every file goes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    UploadTarget,
    Transfer,
    DownloadLink,
}

impl fmt::Display for UploadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadStep::UploadTarget => "upload target",
            UploadStep::Transfer => "transfer",
            UploadStep::DownloadLink => "download link",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct StepFailure {
    step: UploadStep,
    error: StoreError,
}

/// Uploads a batch of files concurrently, one independent task per file.
///
/// A failing file never cancels its siblings: the batch completes only when
/// every task has produced a result, and exactly one [`UploadResult`] comes
/// back per input, in input order.
#[derive(Clone)]
pub struct IngestionPipeline {
    store: Arc<dyn ObjectStore>,
    step_timeout: Duration,
}

impl IngestionPipeline {
    /// `step_timeout` bounds each of the three remote calls separately.
    pub fn new(store: Arc<dyn ObjectStore>, step_timeout: Duration) -> Self {
        Self {
            store,
            step_timeout,
        }
    }

    /// Returns true if the underlying store has credentials configured.
    pub fn is_store_configured(&self) -> bool {
        self.store.is_configured()
    }

    /// Uploads every file and waits for all of them.
    pub async fn ingest(&self, files: Vec<FilePayload>) -> Vec<UploadResult> {
        let total = files.len();
        let mut filenames = Vec::with_capacity(total);
        let mut positions = HashMap::with_capacity(total);
        let mut tasks = JoinSet::new();

        for (index, file) in files.into_iter().enumerate() {
            filenames.push(file.filename.clone());
            let pipeline = self.clone();
            let handle = tasks.spawn(async move { pipeline.upload_one(file).await });
            positions.insert(handle.id(), index);
        }

        let mut results: Vec<Option<UploadResult>> = vec![None; total];

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, result)) => {
                    if let Some(&index) = positions.get(&id) {
                        results[index] = Some(result);
                    }
                }
                Err(join_error) => {
                    if let Some(&index) = positions.get(&join_error.id()) {
                        warn!(
                            filename = %filenames[index],
                            error = %join_error,
                            "Upload task aborted"
                        );
                        results[index] = Some(UploadResult::Failed {
                            filename: filenames[index].clone(),
                            reason: "upload task aborted".to_string(),
                        });
                    }
                }
            }
        }

        results
            .into_iter()
            .zip(filenames)
            .map(|(result, filename)| {
                result.unwrap_or(UploadResult::Failed {
                    filename,
                    reason: "upload task lost".to_string(),
                })
            })
            .collect()
    }

    async fn upload_one(&self, file: FilePayload) -> UploadResult {
        let FilePayload { filename, content } = file;

        match self.run_steps(&filename, content).await {
            Ok(target_url) => {
                info!(filename = %filename, "File uploaded");
                metrics::counter!("cutlink_uploads_total", "outcome" => "uploaded").increment(1);
                UploadResult::Uploaded {
                    filename,
                    target_url,
                }
            }
            Err(StepFailure { step, error }) => {
                warn!(filename = %filename, step = %step, error = %error, "File upload failed");
                metrics::counter!("cutlink_uploads_total", "outcome" => "failed").increment(1);
                UploadResult::Failed {
                    filename,
                    reason: format!("{step}: {error}"),
                }
            }
        }
    }

    async fn run_steps(&self, filename: &str, content: Bytes) -> Result<String, StepFailure> {
        let target = self
            .bounded(
                UploadStep::UploadTarget,
                self.store.request_upload_target(filename),
            )
            .await?;

        let location = self
            .bounded(UploadStep::Transfer, self.store.transfer(&target, content))
            .await?;

        self.bounded(
            UploadStep::DownloadLink,
            self.store.request_download_link(&location),
        )
        .await
    }

    async fn bounded<T>(
        &self,
        step: UploadStep,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StepFailure> {
        match tokio::time::timeout(self.step_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(StepFailure { step, error }),
            Err(_) => Err(StepFailure {
                step,
                error: StoreError::Timeout(self.step_timeout.as_secs()),
            }),
        }
    }
}
