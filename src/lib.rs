//! Zone01 gateway library.
//!
//! A small HTTP façade in front of the Zone01 platform: browser sign-in
//! (credentials → Basic auth → JWT), a session keep-alive, and a
//! pass-through GraphQL proxy, all with permissive CORS.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::{GatewayError, UpstreamError};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
