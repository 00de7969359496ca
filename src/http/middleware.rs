//! Access log middleware.
//!
//! Emits one structured line per request once the response is ready, and
//! feeds the same numbers into the request metrics.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::http::X_REQUEST_ID;
use crate::observability::metrics;

pub async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let route = route_label(&request);
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status().as_u16();
    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status,
        latency = ?latency,
        "{} {} {:?}",
        method,
        path,
        latency
    );
    metrics::record_request(method.as_str(), &route, status, latency);

    response
}

/// Metric label for the request: the matched route template, or
/// `unmatched` so arbitrary paths cannot grow label cardinality.
fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned())
}
