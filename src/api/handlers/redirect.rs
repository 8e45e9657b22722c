//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// Always answers `302 Found`; the stored URL is not proxied or streamed.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&short_id).await?;

    debug!(code = %short_id, "Redirecting");

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, location_header(&link.original))],
    ))
}

/// Stored URLs may contain non-ASCII characters; `Location` must not.
fn location_header(original: &str) -> String {
    url::Url::parse(original)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| original.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header_encodes_non_ascii() {
        assert_eq!(
            location_header("https://example.com/путь?q=да"),
            "https://example.com/%D0%BF%D1%83%D1%82%D1%8C?q=%D0%B4%D0%B0"
        );
    }

    #[test]
    fn test_location_header_keeps_ascii_urls() {
        assert_eq!(
            location_header("https://example.com/a/b?c=d#e"),
            "https://example.com/a/b?c=d#e"
        );
    }
}
