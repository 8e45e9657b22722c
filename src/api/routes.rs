//! API route configuration.

use crate::api::handlers::{create_short_link_handler, get_original_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short link API, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /id/`             - Create a short link (generated or custom code)
/// - `GET  /id/{short_id}/`  - Look up the original URL
///
/// Both forms of each path, with and without the trailing slash, are routed.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/id", post(create_short_link_handler))
        .route("/id/", post(create_short_link_handler))
        .route("/id/{short_id}", get(get_original_handler))
        .route("/id/{short_id}/", get(get_original_handler))
}
