//! OS signal handling.
//!
//! SIGHUP, SIGINT and SIGTERM all request a graceful shutdown. Handlers are
//! registered up front so that a registration failure surfaces at startup
//! rather than when the process is asked to stop.

use std::fmt;

/// A termination request received from the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Hangup,
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::Hangup => "SIGHUP",
            Signal::Interrupt => "SIGINT",
            Signal::Terminate => "SIGTERM",
        };
        f.write_str(name)
    }
}

/// Registered termination signal handlers.
#[cfg(unix)]
pub struct Signals {
    hangup: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    pub fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            hangup: signal(SignalKind::hangup())?,
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the next termination signal.
    pub async fn recv(&mut self) -> Signal {
        tokio::select! {
            _ = self.hangup.recv() => Signal::Hangup,
            _ = self.interrupt.recv() => Signal::Interrupt,
            _ = self.terminate.recv() => Signal::Terminate,
        }
    }
}

/// Registered termination signal handlers (Ctrl+C only).
#[cfg(not(unix))]
pub struct Signals {
    _private: (),
}

#[cfg(not(unix))]
impl Signals {
    pub fn register() -> std::io::Result<Self> {
        Ok(Self { _private: () })
    }

    pub async fn recv(&mut self) -> Signal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to wait for Ctrl+C");
            std::future::pending::<()>().await;
        }
        Signal::Interrupt
    }
}
