//! Handlers for the short link API.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::short_link::{CreateShortLinkRequest, ShortLinkResponse, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_root::public_root;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /api/id/`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path", "custom_id": "promo" }
/// ```
///
/// `custom_id` is optional; when absent, `null` or empty a code is generated.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "url": "https://example.com/some/long/path", "short_link": "http://localhost:3000/promo" }
/// ```
///
/// # Errors
///
/// - 400 if the body is missing or not JSON, `url` is missing or invalid,
///   or `custom_id` is malformed or reserved
/// - 409 if `custom_id` is already taken
pub async fn create_short_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateShortLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortLinkResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Request body is missing",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let root = public_root(state.base_url.as_deref(), &headers)?;
    let url = payload.url.as_deref().unwrap_or_default();

    let link = state
        .link_service
        .create_short_link(url, payload.custom_code())
        .await?;

    let short_link = state.link_service.short_url(&root, &link.short);

    Ok((
        StatusCode::CREATED,
        Json(ShortLinkResponse {
            url: link.original,
            short_link,
        }),
    ))
}

/// Returns the original URL stored under a code.
///
/// # Endpoint
///
/// `GET /api/id/{short_id}/`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn get_original_handler(
    State(state): State<AppState>,
    Path(short_id): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    let link = state.link_service.resolve(&short_id).await?;

    Ok(Json(UrlResponse { url: link.original }))
}
