//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (latency histogram observations)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → /metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metrics live in an explicit registry passed to the router, not a global
//! - Handlers depend on the `LatencySink` trait so tests can swap the sink

pub mod logging;
pub mod metrics;

pub use self::metrics::{ExecutionTimer, LatencySink, Metrics, MetricsError, NoopSink};
