//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, access log)
//!     → handlers (method check, validation, upstream call)
//!     → cors.rs (echo Origin, allowed methods/headers)
//!     → Send to client
//! ```

pub mod cors;
pub mod middleware;
pub mod server;

pub use server::{AppState, GatewayServer};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";
