//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! access log middleware, handlers
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for log shipping)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every access log line
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
