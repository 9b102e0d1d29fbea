//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Behaviour of the `/hello` echo handler.
    pub echo: EchoConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Time allowed for in-flight requests to drain, in seconds.
    pub timeout_secs: u64,
}

impl ShutdownConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

/// Echo handler configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EchoConfig {
    /// Value of the `Version` response header. Omitted when unset or empty.
    pub version: Option<String>,

    /// Sleep for a random duration before answering (latency profiling).
    pub artificial_delay: bool,

    /// Lower bound of the artificial delay in milliseconds.
    pub delay_min_ms: u64,

    /// Upper bound of the artificial delay in milliseconds (inclusive).
    pub delay_max_ms: u64,
}

impl EchoConfig {
    /// The version tag, if one is configured and non-empty.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().filter(|v| !v.is_empty())
    }
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            version: None,
            artificial_delay: true,
            delay_min_ms: 10,
            delay_max_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Expose `/metrics` and time the echo handler.
    pub metrics_enabled: bool,

    /// Prefix of every exported metric name.
    pub metrics_namespace: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_namespace: "httpserver".to_string(),
        }
    }
}
