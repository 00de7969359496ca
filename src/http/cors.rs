//! Permissive CORS decoration for browser callers.
//!
//! The caller's `Origin` is echoed back verbatim (no allow-list), falling
//! back to `*` when the header is absent or empty. Only headers are
//! touched; status and body are left as the handler produced them.

use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        CONTENT_TYPE, ORIGIN, VARY,
    },
    HeaderMap, HeaderValue,
};
use axum::response::Response;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Set the CORS headers on `headers` for a request carrying `request_headers`.
pub fn apply(request_headers: &HeaderMap, headers: &mut HeaderMap) {
    let origin = request_headers
        .get(ORIGIN)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}

/// Response-consuming form of [`apply`].
pub fn decorate(request_headers: &HeaderMap, mut response: Response) -> Response {
    apply(request_headers, response.headers_mut());
    response
}

/// Force `Content-Type: application/json`.
pub fn with_json(headers: &mut HeaderMap) {
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
}
