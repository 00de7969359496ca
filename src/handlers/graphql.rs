//! `/graphql`: byte-exact proxy to the platform's GraphQL engine.
//!
//! The upstream status and body are authoritative. GraphQL errors live
//! inside the body, so nothing is inspected or rewritten on the way back.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue, Method},
    response::{IntoResponse, Response},
};

use crate::error::{GatewayError, UpstreamError};
use crate::handlers::preflight;
use crate::http::{cors, AppState};
use crate::observability::metrics;

pub async fn graphql(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let response = forward(&state, &method, &headers, body).await.into_response();
    cors::decorate(&headers, response)
}

async fn forward(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: Body,
) -> Result<Response, GatewayError> {
    if let Some(response) = preflight(method)? {
        return Ok(response);
    }

    // Forwarded as received; casing and spacing are the caller's.
    let authorization = headers
        .get(AUTHORIZATION)
        .filter(|v| has_bearer_prefix(v))
        .cloned()
        .ok_or(GatewayError::MissingBearer)?;

    let body = to_bytes(body, state.limits.max_body_bytes)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "failed to read graphql request body");
            GatewayError::InvalidBody
        })?;

    let upstream = state
        .upstream
        .graphql(authorization, body)
        .await
        .map_err(|e| {
            metrics::record_upstream_error("graphql");
            match &e {
                UpstreamError::Build(_) => {
                    tracing::error!(error = %e, "cannot create upstream request");
                    GatewayError::RequestBuild
                }
                _ => {
                    tracing::error!(error = %e, "graphql proxy error");
                    GatewayError::GraphqlUnreachable
                }
            }
        })?;

    let status = upstream.status();
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    cors::with_json(response.headers_mut());
    Ok(response)
}

/// Case-insensitive `"bearer "` prefix check.
fn has_bearer_prefix(value: &HeaderValue) -> bool {
    value
        .as_bytes()
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"bearer "))
}
