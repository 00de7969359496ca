//! `/auth/refresh`: session keep-alive acknowledgement.
//!
//! Nothing is validated or forwarded; the frontend only needs a 200.

use axum::{
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    Json,
};

use crate::handlers::preflight;
use crate::http::cors;
use crate::models::StatusResponse;

pub async fn refresh(method: Method, headers: HeaderMap) -> Response {
    let response = match preflight(&method) {
        Ok(Some(response)) => response,
        Ok(None) => Json(StatusResponse::ok()).into_response(),
        Err(e) => e.into_response(),
    };
    cors::decorate(&headers, response)
}
