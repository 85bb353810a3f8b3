use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use log::{error, info};
use serde_json::json;

use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
};

use crate::{
    dtos::checkout::{CreateCheckoutRequest, CreateCheckoutResponse},
    services,
};

/// Creates a subscription checkout session.
///
/// # Input
/// - `req`: JSON payload:
///   - `priceId`: Price identifier of the chosen plan (required)
///   - `email`: (Optional) Signed-in user's email, used to prefill checkout
/// - `config`: Application configuration with the public site origin
/// - `client`: Shared Stripe API client
///
/// # Output
/// - 200 with `{id, clientSecret, url}`; exactly one of `clientSecret`
///   and `url` is non-null, matching the configured presentation mode
/// - 400 `{"error":"Missing priceId"}` when the price identifier is
///   missing or empty; the provider is never contacted in that case
/// - 500 `{"error": message}` when the provider rejects the call
///
/// # Frontend Example
/// ```javascript
/// const res = await fetch('/api/stripe/create-checkout', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ priceId, email }),
/// });
/// const data = await res.json();
/// if (data.url) window.location.href = data.url;
/// ```
#[post("/create-checkout")]
async fn post_create_checkout(
    req: web::Json<CreateCheckoutRequest>,
    config: web::Data<Arc<Config>>,
    client: web::Data<stripe::Client>,
) -> Res<impl Responder> {
    // validate before any provider call
    let price_id = match req.price_id.as_deref() {
        Some(price_id) if !price_id.is_empty() => price_id,
        _ => return Err(AppError::BadRequest("Missing priceId".to_string())),
    };

    let session =
        services::checkout::create_checkout_session(&client, &config, price_id, req.email.as_deref())
            .await?;

    Success::ok(CreateCheckoutResponse {
        id: session.id.to_string(),
        client_secret: session.client_secret.clone(),
        url: session.url.clone(),
    })
}

/// Handles Stripe webhook events.
///
/// # Input
/// - `payload`: Raw string containing the webhook event data
/// - `req`: HTTP request carrying the `stripe-signature` header
/// - `config`: Application configuration with the webhook signing secret
///
/// # Output
/// - 200 `{"received": true}` once the signature verifies
/// - 400 with the plaintext body `Webhook Error: <reason>` on a missing
///   or invalid signature; nothing else happens in that case
///
/// # Note
/// This endpoint is called by Stripe's servers, not by the frontend.
/// Configure the URL in the Stripe Dashboard under Webhooks and set the
/// signing secret in the environment as STRIPE_WEBHOOK_SECRET. Event
/// handling beyond verify-and-log is deliberately not implemented; see
/// `process_webhook_event` for the extension point.
#[post("/webhook")]
async fn post_webhook(
    payload: String,
    req: HttpRequest,
    config: web::Data<Arc<Config>>,
) -> impl Responder {
    let signature = req
        .headers()
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let event =
        match stripe::Webhook::construct_event(&payload, signature, &config.stripe_webhook_secret)
        {
            Ok(event) => event,
            Err(err) => {
                error!("Webhook error: {}", err);
                return HttpResponse::BadRequest().body(format!("Webhook Error: {}", err));
            }
        };

    info!("Received Stripe event: {}", event.type_);
    services::checkout::process_webhook_event(event);

    HttpResponse::Ok().json(json!({ "received": true }))
}
