//! Request handlers for the gateway endpoints.
//!
//! Every browser-facing handler runs the same prologue: CORS decoration,
//! a 204 for `OPTIONS` preflights, and a 405 for anything but `POST`.

mod graphql;
mod health;
mod refresh;
mod signin;

pub use graphql::graphql;
pub use health::health;
pub use refresh::refresh;
pub use signin::signin;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::GatewayError;

/// Explicit 405 for methods the router would otherwise map implicitly.
pub async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

/// `Some(204)` for a preflight, `Err` for a method other than `POST`.
fn preflight(method: &Method) -> Result<Option<Response>, GatewayError> {
    if method == Method::OPTIONS {
        return Ok(Some(StatusCode::NO_CONTENT.into_response()));
    }
    if method != Method::POST {
        return Err(GatewayError::MethodNotAllowed);
    }
    Ok(None)
}
