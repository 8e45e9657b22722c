//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_id}` - Short link redirect
//! - `POST /files`      - Batch file upload, one short link per file
//! - `GET  /health`     - Health check: database, object store
//! - `/api/*`           - Short link REST API
//!
//! The top-level segments `files`, `api` and `health` are reserved and never
//! handed out as short codes.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Body limit** - `/files` accepts bodies up to the configured upload size

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, upload_files_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `max_upload_bytes` - request body limit for `POST /files`
pub fn app_router(state: AppState, max_upload_bytes: usize) -> Router {
    let upload_router = Router::new()
        .route("/files", post(upload_files_handler))
        .route("/files/", post(upload_files_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/{short_id}", get(redirect_handler))
        .route("/{short_id}/", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/health/", get(health_handler))
        .merge(upload_router)
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}
