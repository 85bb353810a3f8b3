use std::sync::Arc;

use log::warn;

use identity::provider::{AuthUser, IdentityProvider, SessionChange};

use crate::navigate::{Navigator, auth_path};

/// Mount-time session check for a protected view.
///
/// `resolve` answers "who is looking at this view"; a missing session or
/// an unresolved user redirects to the auth view instead, carrying the
/// path to return to. `watch` keeps listening for the lifetime of the
/// view so a remote sign-out triggers the same redirect.
pub struct SessionGate<P, N> {
    identity: Arc<P>,
    navigator: Arc<N>,
    return_to: String,
}

impl<P, N> SessionGate<P, N>
where
    P: IdentityProvider + 'static,
    N: Navigator + 'static,
{
    pub fn new(identity: Arc<P>, navigator: Arc<N>, return_to: impl Into<String>) -> Self {
        SessionGate {
            identity,
            navigator,
            return_to: return_to.into(),
        }
    }

    fn redirect_to_auth(&self) {
        self.navigator.push(&auth_path(&self.return_to));
    }

    /// Resolve the signed-in identity for the view. A failed session
    /// fetch counts as "no session"; there are no retries.
    pub async fn resolve(&self) -> Option<AuthUser> {
        let session = match self.identity.get_session().await {
            Ok(session) => session,
            Err(error) => {
                warn!("Session fetch failed, treating as signed out: {}", error);
                None
            }
        };
        if session.is_none() {
            self.redirect_to_auth();
            return None;
        }

        match self.identity.get_user().await {
            Ok(Some(user)) => Some(user),
            _ => {
                self.redirect_to_auth();
                None
            }
        }
    }

    /// Watch session changes until the returned guard is dropped. Any
    /// transition to signed-out redirects to the auth view.
    pub fn watch(&self) -> GateWatch {
        let mut subscription = self.identity.subscribe();
        let navigator = Arc::clone(&self.navigator);
        let target = auth_path(&self.return_to);

        let handle = tokio::spawn(async move {
            while let Some(change) = subscription.changed().await {
                if change == SessionChange::SignedOut {
                    navigator.push(&target);
                }
            }
        });

        GateWatch { handle }
    }
}

/// Holds the watch task; dropping it stops the watcher and releases the
/// underlying auth-change subscription on every exit path.
pub struct GateWatch {
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for GateWatch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
