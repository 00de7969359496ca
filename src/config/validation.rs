//! Configuration validation.
//!
//! Semantic checks that serde cannot express. All errors are collected so
//! an operator sees every problem at once.

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("upstream.base_url '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("{field} '{value}' must start with '/'")]
    InvalidPath { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(
            config.upstream.base_url.clone(),
        )),
    }

    for (field, value) in [
        ("upstream.signin_path", &config.upstream.signin_path),
        ("upstream.graphql_path", &config.upstream.graphql_path),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::InvalidPath {
                field,
                value: value.clone(),
            });
        }
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroValue("listener.port"));
    }
    if config.timeouts.signin_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.signin_secs"));
    }
    if config.timeouts.graphql_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.graphql_secs"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroValue("limits.max_body_bytes"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
