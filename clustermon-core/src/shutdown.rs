//! Cooperative shutdown signalling
//!
//! The poller reads the token once per pass boundary; nothing interrupts
//! an in-flight command execution. The handle side is tripped by the
//! process interrupt handler, or directly in tests.

use tokio::sync::watch;

/// Read side of the shutdown signal, held by the poller
#[derive(Debug, Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Write side of the shutdown signal
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Requests shutdown; takes effect at the poller's next pass boundary.
    pub fn request(&self) {
        let _ = self.tx.send(true);
    }
}

/// Creates a connected handle/token pair.
#[must_use]
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, ShutdownToken { rx })
}

/// Spawns a task that trips `handle` on the first interrupt signal.
pub fn install_interrupt_handler(handle: ShutdownHandle) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current pass");
            handle.request();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_starts_running() {
        let (_handle, token) = shutdown_channel();
        assert!(!token.is_stopped());
    }

    #[test]
    fn request_flips_every_token_clone() {
        let (handle, token) = shutdown_channel();
        let other = token.clone();
        handle.request();
        assert!(token.is_stopped());
        assert!(other.is_stopped());
    }
}
