use tokio::sync::broadcast;

use crate::provider::SessionChange;

/// Receiver half of the auth-change channel. The subscription lives as
/// long as this value; dropping it releases the subscription, so a view
/// that holds one lets go on every exit path without an explicit
/// unsubscribe call.
pub struct AuthSubscription {
    rx: broadcast::Receiver<SessionChange>,
}

impl AuthSubscription {
    pub fn new(rx: broadcast::Receiver<SessionChange>) -> Self {
        Self { rx }
    }

    /// Waits for the next session change. Returns `None` once the sender
    /// side is gone. A lagged receiver skips to the most recent
    /// notifications; both gate paths converge on redirect-if-absent, so
    /// dropped intermediate states are harmless.
    pub async fn changed(&mut self) -> Option<SessionChange> {
        loop {
            match self.rx.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
