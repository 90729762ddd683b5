// Cancellation Signal
// One process-wide source fans out to every queue; queues hold only a cloned
// token (a subscription), never ownership of the source.

use tokio::sync::watch;

/// Read side of the cancellation signal.
///
/// Cancellation is irreversible. A dropped source counts as cancellation so
/// no subscriber can be left waiting forever.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// Check whether cancellation has fired
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Wait for the signal to fire; returns immediately if it already has
    pub async fn cancelled(&mut self) {
        while !*self.rx.borrow() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Write side of the cancellation signal, held by the composition root.
#[derive(Debug)]
pub struct CancellationSource {
    tx: watch::Sender<bool>,
}

impl CancellationSource {
    /// Fire the signal; every live token observes it exactly once
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Mint a fresh subscription
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            rx: self.tx.subscribe(),
        }
    }
}

/// Create a cancellation signal pair
pub fn cancellation_channel() -> (CancellationSource, CancellationToken) {
    let (tx, rx) = watch::channel(false);
    (CancellationSource { tx }, CancellationToken { rx })
}
