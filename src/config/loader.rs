//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable carrying the version tag echoed by `/hello`.
pub const VERSION_ENV: &str = "version";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML document without validating it.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Resolve the startup configuration.
///
/// Precedence, lowest first: defaults, the optional file at `path`, the
/// `version` environment variable, then `bind_address`.
pub fn load(path: Option<&Path>, bind_address: Option<&str>) -> Result<ServerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            parse_config(&content)?
        }
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    if let Some(bind_address) = bind_address {
        config.listener.bind_address = bind_address.to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment-provided values onto `config`.
pub fn apply_env_overrides<F>(config: &mut ServerConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(version) = lookup(VERSION_ENV) {
        config.echo.version = Some(version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [echo]
            artificial_delay = false
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert!(!config.echo.artificial_delay);
        assert_eq!(config.echo.delay_max_ms, 2000);
        assert_eq!(config.shutdown.timeout_secs, 60);
        assert_eq!(config.observability.metrics_namespace, "httpserver");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_version_overrides_file() {
        let mut config = parse_config("[echo]\nversion = \"v0.0.1\"").unwrap();
        let env: HashMap<&str, &str> = [(VERSION_ENV, "v1.2.3")].into_iter().collect();

        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.echo.version(), Some("v1.2.3"));
    }

    #[test]
    fn test_missing_env_keeps_file_version() {
        let mut config = parse_config("[echo]\nversion = \"v0.0.1\"").unwrap();
        apply_env_overrides(&mut config, |_| None);
        assert_eq!(config.echo.version(), Some("v0.0.1"));
    }

    #[test]
    fn test_empty_version_is_treated_as_unset() {
        let mut config = ServerConfig::default();
        apply_env_overrides(&mut config, |_| Some(String::new()));
        assert_eq!(config.echo.version(), None);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("httpserver-{}.toml", std::process::id()));
        fs::write(&path, "[shutdown]\ntimeout_secs = 5\n").unwrap();

        let config = load(Some(path.as_path()), None).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.shutdown.timeout_secs, 5);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!("httpserver-invalid-{}.toml", std::process::id()));
        fs::write(&path, "[shutdown]\ntimeout_secs = 0\n").unwrap();

        let err = load(Some(path.as_path()), None).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load(Some(Path::new("/nonexistent/httpserver.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_bind_override_wins() {
        let config = load(None, Some("127.0.0.1:18080")).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:18080");
    }
}
