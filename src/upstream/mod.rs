//! Upstream (Zone01 platform) subsystem.
//!
//! # Data Flow
//! ```text
//! signin handler  → client.rs (Basic auth POST, buffered reply)
//!                 → normalizer.rs (reply body → token)
//! graphql handler → client.rs (bearer POST, streamed reply)
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client; each call carries its own deadline
//! - Single attempt per call, no retries
//! - Token shapes are pluggable strategies, not handler branches

pub mod client;
pub mod normalizer;

pub use client::{encode_basic, UpstreamClient, UpstreamReply};
pub use normalizer::{JsonFieldNormalizer, NormalizerChain, PlainTextNormalizer, TokenNormalizer};
