//! `/auth/signin`: exchange a credential pair for a platform JWT.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{GatewayError, UpstreamError};
use crate::handlers::preflight;
use crate::http::{cors, AppState};
use crate::models::{LoginRequest, LoginResponse};
use crate::observability::metrics;

pub async fn signin(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let response = authenticate(&state, &method, body).await.into_response();
    cors::decorate(&headers, response)
}

async fn authenticate(state: &AppState, method: &Method, body: Body) -> Result<Response, GatewayError> {
    if let Some(response) = preflight(method)? {
        return Ok(response);
    }

    let body = to_bytes(body, state.limits.max_body_bytes)
        .await
        .map_err(|_| GatewayError::BadRequest)?;
    // First JSON value only; anything after it is ignored.
    let credentials: LoginRequest = serde_json::Deserializer::from_slice(&body)
        .into_iter::<LoginRequest>()
        .next()
        .and_then(Result::ok)
        .ok_or(GatewayError::BadRequest)?;
    if !credentials.is_complete() {
        return Err(GatewayError::BadRequest);
    }

    let reply = state
        .upstream
        .signin(&credentials.identity, &credentials.password)
        .await
        .map_err(|e| {
            metrics::record_upstream_error("signin");
            match &e {
                UpstreamError::Build(_) => {
                    tracing::error!(error = %e, "cannot create auth request");
                    GatewayError::RequestBuild
                }
                _ => {
                    tracing::error!(error = %e, "auth signin proxy error");
                    GatewayError::SigninUnreachable
                }
            }
        })?;

    if !reply.status.is_success() {
        // The upstream text stays in the log; the caller only learns "401".
        tracing::warn!(
            status = reply.status.as_u16(),
            body = %String::from_utf8_lossy(&reply.body),
            "auth signin rejected upstream"
        );
        return Err(GatewayError::InvalidCredentials);
    }

    let token = state.normalizer.extract(&reply.body).ok_or_else(|| {
        tracing::error!(bytes = reply.body.len(), "signin reply carried no token");
        GatewayError::TokenUnparseable
    })?;

    Ok(Json(LoginResponse::new(token)).into_response())
}
