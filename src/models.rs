//! Request and response payloads exchanged with the browser.

use serde::{Deserialize, Serialize};

/// Credentials posted by the frontend to `/auth/signin`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Username or email.
    #[serde(alias = "Identity", alias = "IDENTITY")]
    pub identity: String,
    #[serde(alias = "Password", alias = "PASSWORD")]
    pub password: String,
}

impl LoginRequest {
    /// Both fields must be non-empty before anything is sent upstream.
    pub fn is_complete(&self) -> bool {
        !self.identity.is_empty() && !self.password.is_empty()
    }
}

/// Payload returned after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,

    /// Expiry in seconds since the epoch, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl LoginResponse {
    pub fn new(token: String) -> Self {
        Self { token, exp: None }
    }
}

/// `{"status":"ok"}` body shared by refresh and health.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
