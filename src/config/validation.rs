//! Configuration validation.
//!
//! Returns all validation errors, not just the first.

use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    ZeroShutdownTimeout,
    DelayRange { min_ms: u64, max_ms: u64 },
    EmptyMetricsNamespace,
    InvalidVersion(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address '{}' is not a socket address", addr)
            }
            ValidationError::ZeroShutdownTimeout => {
                write!(f, "shutdown.timeout_secs must be greater than zero")
            }
            ValidationError::DelayRange { min_ms, max_ms } => write!(
                f,
                "echo.delay_min_ms ({}) exceeds echo.delay_max_ms ({})",
                min_ms, max_ms
            ),
            ValidationError::EmptyMetricsNamespace => {
                write!(f, "observability.metrics_namespace must not be empty")
            }
            ValidationError::InvalidVersion(version) => {
                write!(f, "echo.version '{}' is not a valid header value", version.escape_debug())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.shutdown.timeout_secs == 0 {
        errors.push(ValidationError::ZeroShutdownTimeout);
    }

    if config.echo.delay_min_ms > config.echo.delay_max_ms {
        errors.push(ValidationError::DelayRange {
            min_ms: config.echo.delay_min_ms,
            max_ms: config.echo.delay_max_ms,
        });
    }

    if config.observability.metrics_enabled && config.observability.metrics_namespace.is_empty() {
        errors.push(ValidationError::EmptyMetricsNamespace);
    }

    if let Some(version) = config.echo.version() {
        if HeaderValue::from_str(version).is_err() {
            errors.push(ValidationError::InvalidVersion(version.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
