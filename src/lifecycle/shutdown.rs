//! Stop signal for the dispatch worker.
//!
//! # Design Decisions
//! - The signal is sticky: `is_triggered` stays true once raised, even
//!   before the worker has exited
//! - Delivery to the worker goes over a broadcast channel it selects on

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// One-way stop signal shared by the router and its worker.
#[derive(Debug)]
pub struct Shutdown {
    triggered: AtomicBool,
    notify: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self {
            triggered: AtomicBool::new(false),
            notify,
        }
    }

    /// Receiver the worker waits on with [`requested`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    /// Raise the signal. Returns `false` if it was already raised.
    pub fn trigger(&self) -> bool {
        if self.triggered.swap(true, Ordering::AcqRel) {
            return false;
        }
        let _ = self.notify.send(());
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once shutdown has been triggered.
///
/// A dropped coordinator is not a shutdown request: the future stays pending
/// and the task winds down through its other inputs instead.
pub async fn requested(rx: &mut broadcast::Receiver<()>) {
    match rx.recv().await {
        Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
        Err(broadcast::error::RecvError::Closed) => std::future::pending::<()>().await,
    }
}
