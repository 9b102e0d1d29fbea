//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Create the Axum Router with the static route table
//! - Wire up middleware (tracing spans, request logging on `/hello`)
//! - Bind the listener and serve on a background task
//! - Drain in-flight requests on shutdown within a deadline

use std::future::ready;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::config::{EchoConfig, ServerConfig};
use crate::http::handlers;
use crate::http::middleware::log_requests;
use crate::lifecycle::Shutdown;
use crate::observability::{LatencySink, Metrics, MetricsError, NoopSink};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("graceful shutdown did not complete within {0:?}")]
    ShutdownTimeout(Duration),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("failed to register signal handlers: {0}")]
    Signal(#[source] std::io::Error),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub echo: Arc<EchoConfig>,
    /// Pre-encoded `Version` header value.
    pub version: Option<HeaderValue>,
    pub latency: Arc<dyn LatencySink>,
}

/// HTTP server, configured but not yet listening.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a server without a metrics registry.
    pub fn new(config: ServerConfig) -> Self {
        Self::build(config, Arc::new(NoopSink), None)
    }

    /// Create a server that times `/hello` into `metrics` and exposes `/metrics`.
    pub fn with_metrics(config: ServerConfig, metrics: Metrics) -> Self {
        Self::build(config, Arc::new(metrics.clone()), Some(metrics))
    }

    /// Create a server that reports latency to an arbitrary sink.
    pub fn with_sink(config: ServerConfig, sink: Arc<dyn LatencySink>) -> Self {
        Self::build(config, sink, None)
    }

    fn build(config: ServerConfig, latency: Arc<dyn LatencySink>, metrics: Option<Metrics>) -> Self {
        let version = config.echo.version().and_then(|v| match HeaderValue::from_str(v) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(version = %v, error = %e, "Version is not a valid header value, omitting");
                None
            }
        });

        let state = AppState {
            echo: Arc::new(config.echo.clone()),
            version,
            latency,
        };

        let router = Self::build_router(state, metrics);
        Self {
            router,
            config: Arc::new(config),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, metrics: Option<Metrics>) -> Router {
        let mut router = Router::new()
            .route("/healthz", get(handlers::healthz))
            .route("/hello", get(handlers::hello).layer(from_fn(log_requests)));

        if let Some(metrics) = metrics {
            router = router.route("/metrics", get(move || ready(metrics.render())));
        }

        router.with_state(state).layer(TraceLayer::new_for_http())
    }

    /// The route table, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address and start serving in the background.
    ///
    /// Returns as soon as the listener is bound.
    pub async fn start(self) -> Result<RunningServer, ServerError> {
        let address = self.config.listener.bind_address.clone();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })?;

        self.serve(listener)
    }

    /// Start serving on an already bound listener.
    pub fn serve(self, listener: TcpListener) -> Result<RunningServer, ServerError> {
        let local_addr = listener.local_addr()?;
        tracing::info!(address = %local_addr, "HTTP server starting");

        let shutdown = Shutdown::new();
        let stopped = shutdown.wait();
        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(stopped)
                .await
        });

        Ok(RunningServer {
            local_addr,
            shutdown,
            handle,
        })
    }
}

/// A server accepting connections on a background task.
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait up to `timeout` for in-flight
    /// requests to finish.
    pub async fn shutdown(mut self, timeout: Duration) -> Result<(), ServerError> {
        tracing::info!(timeout_secs = timeout.as_secs_f64(), "Stopping HTTP server");
        self.shutdown.trigger();

        match tokio::time::timeout(timeout, &mut self.handle).await {
            Ok(joined) => {
                joined??;
                tracing::info!("HTTP server stopped");
                Ok(())
            }
            Err(_) => {
                self.handle.abort();
                Err(ServerError::ShutdownTimeout(timeout))
            }
        }
    }
}
