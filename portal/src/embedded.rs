use std::sync::Arc;

use async_trait::async_trait;
use log::{error, warn};

use common::error::{AppError, Res};

use crate::navigate::Navigator;

/// Seam for the provider-supplied checkout widget. The real widget runs
/// in the browser; server-side runtimes plug in [`UnavailableMounter`]
/// and rely on the hosted fallback.
#[async_trait]
pub trait EmbeddedMounter: Send + Sync {
    async fn mount(&self, publishable_key: &str, client_secret: &str) -> Res<MountGuard>;
}

/// Destroys the mounted widget when dropped, on every exit path.
pub struct MountGuard {
    destroy: Option<Box<dyn FnOnce() + Send>>,
}

impl MountGuard {
    pub fn new(destroy: impl FnOnce() + Send + 'static) -> Self {
        MountGuard {
            destroy: Some(Box::new(destroy)),
        }
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        if let Some(destroy) = self.destroy.take() {
            destroy();
        }
    }
}

/// The one embedded-checkout component.
///
/// Fallback policy: when the widget cannot be mounted (missing
/// publishable key, unavailable widget runtime, or a mount error) and
/// the provider returned a hosted URL alongside the client secret,
/// redirect there; otherwise log the diagnostic and degrade to a no-op.
pub struct EmbeddedCheckout<M, N> {
    mounter: M,
    navigator: Arc<N>,
    publishable_key: Option<String>,
}

impl<M, N> EmbeddedCheckout<M, N>
where
    M: EmbeddedMounter,
    N: Navigator,
{
    pub fn new(mounter: M, navigator: Arc<N>, publishable_key: Option<String>) -> Self {
        EmbeddedCheckout {
            mounter,
            navigator,
            publishable_key: publishable_key.filter(|key| !key.is_empty()),
        }
    }

    /// Mount the widget for the given client secret. Returns the guard
    /// keeping the widget alive, or `None` when the fallback applied.
    pub async fn mount(&self, client_secret: &str, hosted_url: Option<&str>) -> Option<MountGuard> {
        if client_secret.is_empty() {
            return None;
        }

        let Some(key) = &self.publishable_key else {
            error!("Missing publishable key; cannot mount embedded checkout.");
            return self.fall_back(hosted_url);
        };

        match self.mounter.mount(key, client_secret).await {
            Ok(guard) => Some(guard),
            Err(error) => {
                error!("Embedded checkout init error: {}", error);
                self.fall_back(hosted_url)
            }
        }
    }

    fn fall_back(&self, hosted_url: Option<&str>) -> Option<MountGuard> {
        match hosted_url {
            Some(url) => {
                self.navigator.push(url);
                None
            }
            None => {
                warn!("Embedded checkout unavailable and no hosted URL to fall back to.");
                None
            }
        }
    }
}

/// Default mounter for runtimes without the widget; always reports it as
/// unavailable so the hosted fallback applies.
pub struct UnavailableMounter;

#[async_trait]
impl EmbeddedMounter for UnavailableMounter {
    async fn mount(&self, _publishable_key: &str, _client_secret: &str) -> Res<MountGuard> {
        Err(AppError::Internal(
            "embedded checkout widget is not available in this runtime".to_string(),
        ))
    }
}
