use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashSet;
use log::error;
use serde::{Deserialize, Serialize};

use common::error::{AppError, Res};
use common::plans::Plan;
use identity::provider::IdentityProvider;

use crate::embedded::{EmbeddedCheckout, EmbeddedMounter, MountGuard};
use crate::navigate::{DEFAULT_REDIRECT, Navigator, auth_path};

/// Notice shown when checkout session creation fails. The action stays
/// enabled so the user can retry.
pub const CHECKOUT_FAILED_NOTICE: &str = "Checkout failed. Please try again.";

/// Normalized result of a create-checkout-session call. Exactly one of
/// `url` and `client_secret` is populated for the configured mode.
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutSessionResult {
    pub id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: Option<String>,
    pub url: Option<String>,
}

/// Access to the create-checkout endpoint.
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    async fn create_session(
        &self,
        price_id: &str,
        email: Option<&str>,
    ) -> Res<CheckoutSessionResult>;
}

#[derive(Serialize)]
struct CreateCheckoutBody<'a> {
    #[serde(rename = "priceId")]
    price_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

/// Calls the portal's own create-checkout endpoint over HTTP.
pub struct HttpCheckoutApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCheckoutApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        HttpCheckoutApi {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CheckoutApi for HttpCheckoutApi {
    async fn create_session(
        &self,
        price_id: &str,
        email: Option<&str>,
    ) -> Res<CheckoutSessionResult> {
        let response = self
            .client
            .post(format!("{}/api/stripe/create-checkout", self.base_url))
            .json(&CreateCheckoutBody { price_id, email })
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|error| error.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "Failed to create checkout session".to_string());
            return Err(AppError::Provider(message));
        }

        Ok(response.json::<CheckoutSessionResult>().await?)
    }
}

/// User-facing failure notices (the blocking alert of the checkout view).
pub trait Notices: Send + Sync {
    fn alert(&self, message: &str);
}

/// Drives the subscribe action on the pricing page.
///
/// Requires an active session, creates the checkout session server-side
/// and presents the result: hosted URL wins when present, a lone client
/// secret goes to the embedded component, and a result with neither is
/// logged and dropped.
pub struct CheckoutLauncher<P, A, M, N, U> {
    identity: Arc<P>,
    api: Arc<A>,
    embedded: EmbeddedCheckout<M, N>,
    navigator: Arc<N>,
    notices: Arc<U>,
    pending: DashSet<String>,
}

impl<P, A, M, N, U> CheckoutLauncher<P, A, M, N, U>
where
    P: IdentityProvider,
    A: CheckoutApi,
    M: EmbeddedMounter,
    N: Navigator,
    U: Notices,
{
    pub fn new(
        identity: Arc<P>,
        api: Arc<A>,
        embedded: EmbeddedCheckout<M, N>,
        navigator: Arc<N>,
        notices: Arc<U>,
    ) -> Self {
        CheckoutLauncher {
            identity,
            api,
            embedded,
            navigator,
            notices,
            pending: DashSet::new(),
        }
    }

    /// Launch checkout for a plan. Returns the embedded mount guard when
    /// the embedded path was taken; the caller holds it for the widget's
    /// lifetime.
    pub async fn subscribe(&self, plan: &Plan) -> Option<MountGuard> {
        let price_id = plan.price_id.as_str();
        if price_id.is_empty() {
            return None;
        }

        // require login first; come back here afterwards
        let session = self.identity.get_session().await.ok().flatten();
        let Some(session) = session else {
            self.navigator.push(&auth_path(DEFAULT_REDIRECT));
            return None;
        };

        // one request per plan at a time; other plans stay interactive
        if !self.pending.insert(price_id.to_string()) {
            return None;
        }
        let result = self
            .api
            .create_session(price_id, Some(&session.user.email))
            .await;
        self.pending.remove(price_id);

        match result {
            Ok(created) => self.present(created).await,
            Err(err) => {
                error!("Subscription error: {}", err);
                self.notices.alert(CHECKOUT_FAILED_NOTICE);
                None
            }
        }
    }

    async fn present(&self, created: CheckoutSessionResult) -> Option<MountGuard> {
        match (created.url, created.client_secret) {
            // hosted redirect wins even when a client secret came along
            (Some(url), _) => {
                self.navigator.push(&url);
                None
            }
            (None, Some(secret)) => self.embedded.mount(&secret, None).await,
            (None, None) => {
                error!("No checkout URL or client secret returned.");
                None
            }
        }
    }
}
