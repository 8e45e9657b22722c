//! Handler for batch file upload.

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Multipart, State},
    http::HeaderMap,
};
use serde_json::json;
use tracing::info;

use crate::api::dto::upload::{BatchSummary, UploadResponse, UploadResultItem};
use crate::domain::entities::{FileOutcome, FilePayload};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_root::public_root;
use crate::utils::upload_filename::{ALLOWED_EXTENSIONS, has_allowed_extension, sanitize_filename};

/// Multipart field carrying the files.
const FILES_FIELD: &str = "files";

/// Uploads files to the object store and returns a short link per file.
///
/// # Endpoint
///
/// `POST /files` (`multipart/form-data`, one or more `files` parts)
///
/// # Batch Processing
///
/// The batch is checked as a whole first: a part without a filename, with a
/// disallowed extension, or whose name repeats an earlier part rejects the
/// request before anything is uploaded. Names are stored under the remote
/// root by filename, so two parts with one name would share one object.
/// After that every file is uploaded concurrently and fails on its own.
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 2, "successful": 1, "failed": 1 },
///   "items": [
///     { "filename": "a.png", "short_link": "http://localhost:3000/Xy12Ab" },
///     { "filename": "b.pdf", "error": "transfer: timed out after 30s" }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - 400 for an empty batch, too many files, or a rejected or repeated filename
/// - 502 if the object store has no credentials configured
pub async fn upload_files_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let root = public_root(state.base_url.as_deref(), &headers)?;
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::bad_request("Malformed multipart body", json!({ "reason": e.body_text() }))
    })? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let raw_name = field.file_name().unwrap_or_default().to_string();
        let filename = sanitize_filename(&raw_name).ok_or_else(|| {
            AppError::bad_request("Every file must have a name", json!({ "filename": raw_name }))
        })?;

        if !has_allowed_extension(&filename) {
            return Err(AppError::bad_request(
                "File type is not allowed",
                json!({ "filename": filename, "allowed": ALLOWED_EXTENSIONS }),
            ));
        }

        if !seen.insert(filename.clone()) {
            return Err(AppError::bad_request(
                "Duplicate file name",
                json!({ "filename": filename }),
            ));
        }

        if files.len() == state.max_upload_files {
            return Err(AppError::bad_request(
                format!("At most {} files per upload", state.max_upload_files),
                json!({ "max_files": state.max_upload_files }),
            ));
        }

        let content = field.bytes().await.map_err(|e| {
            AppError::bad_request(
                "Failed to read uploaded file",
                json!({ "filename": filename, "reason": e.body_text() }),
            )
        })?;

        files.push(FilePayload::new(filename, content));
    }

    if files.is_empty() {
        return Err(AppError::bad_request("No files selected", json!({})));
    }

    if !state.upload_service.pipeline().is_store_configured() {
        return Err(AppError::bad_gateway(
            "Object store is not configured",
            json!({}),
        ));
    }

    let total = files.len();
    let outcomes = state.upload_service.upload_and_shorten(files).await;

    let items: Vec<UploadResultItem> = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            FileOutcome::Shortened { filename, link } => UploadResultItem::Success {
                short_link: state.link_service.short_url(&root, &link.short),
                filename,
            },
            FileOutcome::Failed { filename, reason } => UploadResultItem::Error {
                filename,
                error: reason,
            },
        })
        .collect();

    let successful = items
        .iter()
        .filter(|item| matches!(item, UploadResultItem::Success { .. }))
        .count();

    info!(total, successful, "Upload batch processed");

    Ok(Json(UploadResponse {
        summary: BatchSummary {
            total,
            successful,
            failed: total - successful,
        },
        items,
    }))
}
