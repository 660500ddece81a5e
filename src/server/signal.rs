// Signal handling module
//
// SIGINT (Ctrl+C) is the only shutdown path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[cfg(not(unix))]
use crate::logger;

/// Shutdown request shared between the signal task and the accept loop
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    notify: Arc<Notify>,
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown; a waiter that arrives later still sees it
    pub fn trigger(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Wait until `trigger` has been called
    pub async fn notified(&self) {
        if self.is_requested() {
            return;
        }
        self.notify.notified().await;
    }
}

/// Register the SIGINT handler and trigger `shutdown` when it fires
///
/// Registration happens before this returns, so an interrupt sent right
/// after the serving lines are printed is not lost.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Shutdown) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        if sigint.recv().await.is_some() {
            shutdown.trigger();
        }
    });
    Ok(())
}

/// Windows fallback - Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Shutdown) -> std::io::Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown.trigger(),
            Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });
    Ok(())
}
