//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional config file (TOML, loader.rs)
//!     → environment overrides (`version`)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc with handlers
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup; handlers never read the environment
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::{EchoConfig, ListenerConfig, ObservabilityConfig, ServerConfig, ShutdownConfig};
