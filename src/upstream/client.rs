//! Outbound calls to the Zone01 platform.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::error::UpstreamError;

/// Fully buffered upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// HTTP client bound to the configured upstream endpoints.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    signin_url: String,
    graphql_url: String,
    signin_timeout: Duration,
    graphql_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("zone01-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self {
            http,
            signin_url: upstream.signin_url(),
            graphql_url: upstream.graphql_url(),
            signin_timeout: Duration::from_secs(timeouts.signin_secs),
            graphql_timeout: Duration::from_secs(timeouts.graphql_secs),
        })
    }

    /// POST to the sign-in endpoint with Basic credentials and no body.
    pub async fn signin(&self, identity: &str, password: &str) -> Result<UpstreamReply, UpstreamError> {
        let response = self
            .http
            .post(&self.signin_url)
            .header(header::AUTHORIZATION, format!("Basic {}", encode_basic(identity, password)))
            .timeout(self.signin_timeout)
            .send()
            .await?;

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            // A rejection is a rejection even if its body is cut short.
            Err(e) if !status.is_success() => {
                tracing::debug!(status = status.as_u16(), error = %e, "signin rejection body unreadable");
                Bytes::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(UpstreamReply { status, body })
    }

    /// POST a GraphQL document on behalf of the caller.
    ///
    /// The response body is left unread so it can be streamed back.
    pub async fn graphql(
        &self,
        authorization: HeaderValue,
        body: Bytes,
    ) -> Result<reqwest::Response, UpstreamError> {
        let response = self
            .http
            .post(&self.graphql_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, authorization)
            .body(body)
            .timeout(self.graphql_timeout)
            .send()
            .await?;
        Ok(response)
    }
}

/// Standard Base64 of `identity:password`.
pub fn encode_basic(identity: &str, password: &str) -> String {
    STANDARD.encode(format!("{identity}:{password}"))
}
