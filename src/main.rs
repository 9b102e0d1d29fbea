//! `httpserver` binary.
//!
//! ```text
//! httpserver [--config <path>] [--bind <addr>]
//! ```
//!
//! Exit status is 0 after a clean drain and 1 when configuration, binding or
//! the shutdown deadline fails.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use httpserver::config::{self, ObservabilityConfig};
use httpserver::lifecycle::startup;
use httpserver::observability::logging;

#[derive(Parser)]
#[command(name = "httpserver")]
#[command(about = "Health check and header echo HTTP server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the configuration file.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load(cli.config.as_deref(), cli.bind.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        shutdown_timeout_secs = config.shutdown.timeout_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Starting HTTP server"
    );

    match startup::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "HTTP server failed");
            ExitCode::FAILURE
        }
    }
}
