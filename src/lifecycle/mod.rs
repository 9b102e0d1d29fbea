//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Build metrics → Build router → Bind listener → Serve in background
//!
//! Signals (signals.rs):
//!     SIGHUP/SIGINT/SIGTERM → stop future resolves
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Stop accepting → Drain in-flight requests (bounded) → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: bind failure is fatal
//! - Shutdown has a deadline; missing it is fatal
//! - Only the first signal matters; later signals are not escalated

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::{Signal, Signals};
