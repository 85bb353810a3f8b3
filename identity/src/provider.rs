use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use common::error::Res;

use crate::subscription::AuthSubscription;

/// The user record the identity provider resolves for a session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

impl AuthUser {
    /// Display name, falling back to the local part of the email when the
    /// provider carries no name metadata.
    pub fn display_name(&self) -> &str {
        match &self.full_name {
            Some(name) => name,
            None => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Provider-issued proof of authentication. Held only in process memory;
/// created on sign-in, cleared on sign-out or provider-reported expiry.
#[derive(Clone, Debug)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

/// Payload of an auth-change notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn,
    SignedOut,
}

/// Operations consumed from the identity provider. Views receive an
/// implementation at construction instead of reaching for a shared
/// client singleton, which keeps them testable against mocks.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session, or `None` when signed out.
    async fn get_session(&self) -> Res<Option<Session>>;

    /// Revalidates the held token against the provider. `None` when the
    /// provider no longer resolves a user for it.
    async fn get_user(&self) -> Res<Option<AuthUser>>;

    /// Requests account creation. No session is created on success.
    async fn sign_up(&self, email: &str, password: &str) -> Res<()>;

    /// Credential-based sign-in. Stores the session and notifies
    /// subscribers on success.
    async fn sign_in(&self, email: &str, password: &str) -> Res<Session>;

    /// Ends the session. Local state is cleared even when the remote
    /// call fails.
    async fn sign_out(&self) -> Res<()>;

    /// Subscribe to session-change notifications. Dropping the returned
    /// guard releases the subscription.
    fn subscribe(&self) -> AuthSubscription;
}
