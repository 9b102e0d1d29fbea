//! Startup orchestration.
//!
//! Builds the metrics registry and the server, binds the listener, waits for
//! the stop request and drains. Every failure is returned to `main`, which
//! treats it as fatal.

use std::future::Future;

use crate::config::ServerConfig;
use crate::http::{HttpServer, ServerError};
use crate::lifecycle::signals::Signals;
use crate::observability::Metrics;

/// Run the server until SIGHUP, SIGINT or SIGTERM, then drain.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let mut signals = Signals::register().map_err(ServerError::Signal)?;

    run_until(config, async move {
        let signal = signals.recv().await;
        tracing::info!(signal = %signal, "Received termination signal");
    })
    .await
}

/// Run the server until `stop` completes, then drain within the configured
/// shutdown timeout.
pub async fn run_until<F>(config: ServerConfig, stop: F) -> Result<(), ServerError>
where
    F: Future<Output = ()>,
{
    let timeout = config.shutdown.timeout();

    let server = if config.observability.metrics_enabled {
        let metrics = Metrics::new(&config.observability.metrics_namespace)?;
        HttpServer::with_metrics(config, metrics)
    } else {
        HttpServer::new(config)
    };

    let running = server.start().await?;
    tracing::info!(address = %running.local_addr(), "HTTP server started");

    stop.await;

    running.shutdown(timeout).await?;
    tracing::info!("HTTP server shut down cleanly");
    Ok(())
}
