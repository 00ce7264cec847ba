//! Host readiness signalling.
//!
//! A host calls [`ReadyNotifier::notify`] once its display surface can take
//! writes. Anything registered on the paired [`ReadySignal`] starts then.

use std::future;

use tokio::sync::watch;

/// Create a connected notifier/signal pair in the "not ready" state.
pub fn ready_channel() -> (ReadyNotifier, ReadySignal) {
    let (sender, receiver) = watch::channel(false);

    (ReadyNotifier { sender }, ReadySignal { receiver })
}

#[derive(Debug)]
pub struct ReadyNotifier {
    sender: watch::Sender<bool>,
}

impl ReadyNotifier {
    /// Mark the host ready. Calling it again has no further effect.
    pub fn notify(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_ready(&self) -> bool {
        *self.sender.borrow()
    }
}

#[derive(Debug, Clone)]
pub struct ReadySignal {
    receiver: watch::Receiver<bool>,
}

impl ReadySignal {
    pub fn is_ready(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once the host is ready.
    ///
    /// Resolves immediately when readiness was already signalled. If the
    /// notifier is dropped without signalling, this never resolves.
    pub async fn wait(mut self) {
        let signalled = self.receiver.wait_for(|ready| *ready).await.is_ok();

        if !signalled {
            future::pending::<()>().await;
        }
    }
}
