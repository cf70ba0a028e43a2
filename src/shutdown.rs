//! Cooperative shutdown
//!
//! A clone-able cancellation flag handed to every polling task, flipped by the
//! Ctrl-C handler. Replaces the global `running` booleans the original
//! samples guarded their loops with.

use tokio::sync::watch;

/// A handle on the shutdown flag. Cheap to clone; one per task.
#[derive(Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Has shutdown been requested?
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until shutdown is requested.
    pub async fn recv(&mut self) {
        // wait_for returns when the value is true or the sender is gone;
        // either way the task should stop.
        let _ = self.rx.wait_for(|stop| *stop).await;
    }

    /// Sleep for `duration`, returning early if shutdown arrives. Returns
    /// false when interrupted.
    pub async fn sleep(&mut self, duration: std::time::Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.recv() => false,
        }
    }
}

/// Install a Ctrl-C listener and get the matching shutdown handle.
pub fn ctrl_c() -> Shutdown {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Exiting...");
            let _ = tx.send(true);
        }
    });
    Shutdown { rx }
}

/// A manually triggered flag for tests and non-signal shutdown paths.
pub fn manual() -> (watch::Sender<bool>, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (tx, Shutdown { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_flag_observed() {
        let (tx, shutdown) = manual();
        assert!(!shutdown.is_shutdown());
        tx.send(true).unwrap();
        assert!(shutdown.is_shutdown());
    }

    #[tokio::test]
    async fn test_sleep_interrupted() {
        let (tx, mut shutdown) = manual();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = tx.send(true);
        });
        // A long sleep returns early once the flag flips
        assert!(!shutdown.sleep(Duration::from_secs(30)).await);
    }

    #[tokio::test]
    async fn test_sleep_completes() {
        let (_tx, mut shutdown) = manual();
        assert!(shutdown.sleep(Duration::from_millis(5)).await);
    }
}
