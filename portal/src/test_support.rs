use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast;

use common::error::{AppError, Res};
use identity::provider::{AuthUser, IdentityProvider, Session, SessionChange};
use identity::subscription::AuthSubscription;

use crate::checkout::{CheckoutApi, CheckoutSessionResult, Notices};
use crate::embedded::{EmbeddedMounter, MountGuard};
use crate::navigate::Navigator;

pub(crate) fn test_user(email: &str) -> AuthUser {
    AuthUser {
        id: "user-1".to_string(),
        email: email.to_string(),
        full_name: None,
    }
}

fn test_session(email: &str) -> Session {
    Session {
        access_token: "jwt-test".to_string(),
        user: test_user(email),
    }
}

/// Scriptable identity provider.
pub(crate) struct MockIdentity {
    session: Mutex<Option<Session>>,
    user: Mutex<Option<AuthUser>>,
    pub fail_user_fetch: AtomicBool,
    pub sign_up_error: Mutex<Option<String>>,
    pub sign_in_error: Mutex<Option<String>>,
    pub changes: broadcast::Sender<SessionChange>,
}

impl MockIdentity {
    pub fn signed_out() -> Self {
        let (changes, _) = broadcast::channel(8);
        MockIdentity {
            session: Mutex::new(None),
            user: Mutex::new(None),
            fail_user_fetch: AtomicBool::new(false),
            sign_up_error: Mutex::new(None),
            sign_in_error: Mutex::new(None),
            changes,
        }
    }

    pub fn signed_in(email: &str) -> Self {
        let mock = Self::signed_out();
        *mock.session.lock().unwrap() = Some(test_session(email));
        *mock.user.lock().unwrap() = Some(test_user(email));
        mock
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn get_session(&self) -> Res<Option<Session>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn get_user(&self) -> Res<Option<AuthUser>> {
        if self.fail_user_fetch.load(Ordering::SeqCst) {
            return Err(AppError::Provider("user fetch failed".to_string()));
        }
        Ok(self.user.lock().unwrap().clone())
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Res<()> {
        match self.sign_up_error.lock().unwrap().clone() {
            Some(message) => Err(AppError::Provider(message)),
            None => Ok(()),
        }
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Res<Session> {
        if let Some(message) = self.sign_in_error.lock().unwrap().clone() {
            return Err(AppError::Provider(message));
        }
        let session = test_session(email);
        *self.session.lock().unwrap() = Some(session.clone());
        *self.user.lock().unwrap() = Some(session.user.clone());
        let _ = self.changes.send(SessionChange::SignedIn);
        Ok(session)
    }

    async fn sign_out(&self) -> Res<()> {
        self.session.lock().unwrap().take();
        self.user.lock().unwrap().take();
        let _ = self.changes.send(SessionChange::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.changes.subscribe())
    }
}

/// Records navigation side effects.
#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub pushes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.pushes.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.pushes.lock().unwrap().push(path.to_string());
    }
}

/// Records user-facing failure notices.
#[derive(Default)]
pub(crate) struct RecordingNotices {
    pub alerts: Mutex<Vec<String>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notices for RecordingNotices {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// Counts create-session calls; optionally fails, optionally parks until
/// released so in-flight behavior can be observed.
pub(crate) struct CountingCheckoutApi {
    pub calls: AtomicUsize,
    pub result: Mutex<Res<CheckoutSessionResult>>,
    pub gate: Mutex<Option<tokio::sync::oneshot::Receiver<()>>>,
}

impl CountingCheckoutApi {
    pub fn returning(result: Res<CheckoutSessionResult>) -> Self {
        CountingCheckoutApi {
            calls: AtomicUsize::new(0),
            result: Mutex::new(result),
            gate: Mutex::new(None),
        }
    }

    pub fn hosted(url: &str) -> Self {
        Self::returning(Ok(CheckoutSessionResult {
            id: "cs_test_1".to_string(),
            client_secret: None,
            url: Some(url.to_string()),
        }))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CheckoutApi for CountingCheckoutApi {
    async fn create_session(
        &self,
        _price_id: &str,
        _email: Option<&str>,
    ) -> Res<CheckoutSessionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match &*self.result.lock().unwrap() {
            Ok(result) => Ok(result.clone()),
            Err(error) => Err(AppError::Provider(error.to_string())),
        }
    }
}

/// Mounter that either succeeds (recording the mount) or reports the
/// widget as unavailable.
pub(crate) struct MockMounter {
    pub available: bool,
    pub mounts: AtomicUsize,
}

impl MockMounter {
    pub fn available() -> Self {
        MockMounter {
            available: true,
            mounts: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        MockMounter {
            available: false,
            mounts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddedMounter for MockMounter {
    async fn mount(&self, _publishable_key: &str, _client_secret: &str) -> Res<MountGuard> {
        if !self.available {
            return Err(AppError::Internal("widget unavailable".to_string()));
        }
        self.mounts.fetch_add(1, Ordering::SeqCst);
        Ok(MountGuard::new(|| {}))
    }
}
