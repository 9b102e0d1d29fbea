//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use httpserver::config::ServerConfig;
use httpserver::http::{HttpServer, RunningServer};
use httpserver::observability::Metrics;

/// Configuration bound to an ephemeral local port, with no artificial delay.
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.echo.artificial_delay = false;
    config.observability.metrics_enabled = false;
    config
}

/// Configuration whose echo handler always sleeps for `delay`.
pub fn slow_config(delay: Duration) -> ServerConfig {
    let mut config = test_config();
    config.echo.artificial_delay = true;
    config.echo.delay_min_ms = delay.as_millis() as u64;
    config.echo.delay_max_ms = delay.as_millis() as u64;
    config
}

pub async fn start_server(config: ServerConfig) -> RunningServer {
    HttpServer::new(config).start().await.unwrap()
}

pub async fn start_server_with_metrics(config: ServerConfig, metrics: Metrics) -> RunningServer {
    HttpServer::with_metrics(config, metrics).start().await.unwrap()
}

/// Client without connection pooling, so drains are not held up by idle
/// keep-alive connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}{}", addr, path)
}

/// Read `<metric>_count{step="<step>"}` from a Prometheus text exposition.
pub fn histogram_count(exposition: &str, metric: &str, step: &str) -> Option<u64> {
    let prefix = format!("{}_count{{step=\"{}\"}} ", metric, step);
    exposition
        .lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .and_then(|value| value.trim().parse().ok())
}
