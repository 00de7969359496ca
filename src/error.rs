//! Gateway error types and their HTTP mapping.
//!
//! Client-visible messages are fixed strings. Raw request input and
//! upstream diagnostics are only ever written to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised while talking to the Zone01 platform.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The outbound request could not be constructed.
    #[error("failed to build upstream request: {0}")]
    Build(#[source] reqwest::Error),

    /// The call did not complete before its deadline.
    #[error("upstream timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// DNS, connect, or body transfer failure.
    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            UpstreamError::Build(err)
        } else if err.is_timeout() {
            UpstreamError::Timeout(err)
        } else {
            UpstreamError::Transport(err)
        }
    }
}

/// Terminal outcome of a handler that did not succeed.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("bad request")]
    BadRequest,

    #[error("invalid request body")]
    InvalidBody,

    #[error("missing bearer token")]
    MissingBearer,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("cannot create upstream request")]
    RequestBuild,

    #[error("auth service unreachable")]
    SigninUnreachable,

    #[error("could not parse token")]
    TokenUnparseable,

    #[error("graphql upstream unreachable")]
    GraphqlUnreachable,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::BadRequest | GatewayError::InvalidBody => StatusCode::BAD_REQUEST,
            GatewayError::MissingBearer | GatewayError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            GatewayError::RequestBuild => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::SigninUnreachable
            | GatewayError::TokenUnparseable
            | GatewayError::GraphqlUnreachable => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
