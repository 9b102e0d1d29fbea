//! Minimal HTTP service with graceful shutdown.
//!
//! Serves a liveness probe (`/healthz`), a header echo endpoint (`/hello`)
//! and Prometheus metrics (`/metrics`). On SIGHUP, SIGINT or SIGTERM the
//! server stops accepting connections and drains in-flight requests within a
//! configurable deadline.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::{HttpServer, RunningServer, ServerError};
pub use lifecycle::Shutdown;
