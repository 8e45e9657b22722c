//! Public root URL used to build fully-qualified short links.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Returns the public root (always ending in `/`) for short links.
///
/// A configured `base_url` wins. Otherwise the root is built from the
/// `Host` header, keeping any port, and the scheme from `X-Forwarded-Proto`
/// (`http` when absent).
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no `base_url` is configured and the
/// `Host` header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// assert_eq!(public_root(None, &headers).unwrap(), "http://localhost:3000/");
/// ```
pub fn public_root(base_url: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(base) = base_url {
        return Ok(format!("{}/", base.trim_end_matches('/')));
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|proto| *proto == "https" || *proto == "http")
        .unwrap_or("http");

    Ok(format!("{}://{}/", scheme, host))
}
