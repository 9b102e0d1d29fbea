//! Shutdown coordination.

use std::future::Future;

use tokio::sync::watch;

/// Coordinator for graceful shutdown.
///
/// The flag only moves from "running" to "stopping", so a waiter created
/// after the trigger still completes immediately.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Trigger the shutdown signal.
    ///
    /// Returns `true` only for the call that actually initiated shutdown.
    pub fn trigger(&self) -> bool {
        let already = self.tx.send_replace(true);
        if !already {
            tracing::info!("Shutdown triggered");
        }
        !already
    }

    /// Check if shutdown was triggered (non-blocking).
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// A future that completes once shutdown is triggered.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            while !*rx.borrow() {
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
