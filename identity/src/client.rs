use async_trait::async_trait;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use tokio::sync::{RwLock, broadcast};

use common::error::{AppError, Res};

use crate::dtos::auth::{CredentialsRequest, ProviderError, TokenResponse, UserPayload};
use crate::provider::{AuthUser, IdentityProvider, Session, SessionChange};
use crate::subscription::AuthSubscription;

/// HTTP client for a GoTrue-style identity service. Holds the current
/// session in process memory and broadcasts sign-in/sign-out transitions
/// to subscribers.
pub struct IdentityClient {
    client: Client,
    base_url: String,
    public_key: String,
    session: RwLock<Option<Session>>,
    changes: broadcast::Sender<SessionChange>,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>, public_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let (changes, _) = broadcast::channel(16);
        IdentityClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            public_key: public_key.into(),
            session: RwLock::new(None),
            changes,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    async fn store_session(&self, session: Session) {
        *self.session.write().await = Some(session);
        let _ = self.changes.send(SessionChange::SignedIn);
    }

    async fn clear_session(&self) {
        let had_session = self.session.write().await.take().is_some();
        if had_session {
            let _ = self.changes.send(SessionChange::SignedOut);
        }
    }

    async fn provider_error(response: reqwest::Response) -> AppError {
        let message = response
            .json::<ProviderError>()
            .await
            .map(ProviderError::into_message)
            .unwrap_or_else(|_| "Identity provider request failed".to_string());
        warn!("Identity provider rejected the request: {}", message);
        AppError::Provider(message)
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn get_session(&self) -> Res<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn get_user(&self) -> Res<Option<AuthUser>> {
        let Some(session) = self.session.read().await.clone() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.endpoint("/user"))
            .header("apikey", &self.public_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if response.status() == StatusCode::OK {
            let payload = response.json::<UserPayload>().await?;
            Ok(Some(AuthUser::from(payload)))
        } else {
            // the token no longer resolves a user; treat it as signed out
            warn!("Identity provider no longer resolves the session user");
            self.clear_session().await;
            Ok(None)
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Res<()> {
        info!("Requesting account creation for {}", email);
        let response = self
            .client
            .post(self.endpoint("/signup"))
            .header("apikey", &self.public_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::provider_error(response).await)
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Res<Session> {
        let response = self
            .client
            .post(self.endpoint("/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.public_key)
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let token = response.json::<TokenResponse>().await?;
        let session = Session {
            access_token: token.access_token,
            user: AuthUser::from(token.user),
        };
        self.store_session(session.clone()).await;
        Ok(session)
    }

    async fn sign_out(&self) -> Res<()> {
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|session| session.access_token.clone());

        if let Some(token) = token {
            let result = self
                .client
                .post(self.endpoint("/logout"))
                .header("apikey", &self.public_key)
                .bearer_auth(&token)
                .send()
                .await;
            if let Err(error) = result {
                warn!("Remote sign-out failed: {}", error);
            }
        }

        // local state goes away regardless of the remote outcome
        self.clear_session().await;
        Ok(())
    }

    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.changes.subscribe())
    }
}
