use log::info;
use stripe::{
    CheckoutSession, CheckoutSessionBillingAddressCollection, CheckoutSessionMode,
    CheckoutSessionUiMode, Client, CreateCheckoutSession, CreateCheckoutSessionAutomaticTax,
    CreateCheckoutSessionLineItems, Event, EventObject, EventType,
};

use common::{
    env_config::Config,
    error::{AppError, Res},
};

/// Success, cancel and return URLs rooted at the configured site origin.
pub(crate) struct CheckoutUrls {
    pub(crate) success: String,
    pub(crate) cancel: String,
    pub(crate) return_to: String,
}

impl CheckoutUrls {
    pub(crate) fn from_origin(site: &str) -> Self {
        let site = site.trim_end_matches('/');
        CheckoutUrls {
            success: format!("{site}/subscriptions?status=success"),
            cancel: format!("{site}/subscriptions?status=cancelled"),
            // the session-id placeholder is substituted by the provider on
            // return, for later correlation
            return_to: format!(
                "{site}/subscriptions?status=success&session_id={{CHECKOUT_SESSION_ID}}"
            ),
        }
    }
}

/// Email prefill for signed-in users. Attached only when the trimmed
/// value still looks like an address.
pub(crate) fn prefill_email(email: Option<&str>) -> Option<&str> {
    email.map(str::trim).filter(|email| email.contains('@'))
}

/// Build provider parameters for one presentation mode.
///
/// Hosted checkout carries success/cancel URLs and no UI-mode marker;
/// embedded checkout carries the UI-mode marker and a single return URL.
/// Mixing the two sets confuses the provider, so each branch assembles
/// its own complete parameter struct instead of patching fields after
/// the fact.
pub(crate) fn assemble_params<'a>(
    price_id: &'a str,
    email: Option<&'a str>,
    urls: &'a CheckoutUrls,
    embedded: bool,
) -> CreateCheckoutSession<'a> {
    let line_items = vec![CreateCheckoutSessionLineItems {
        price: Some(price_id.to_string()),
        quantity: Some(1),
        ..Default::default()
    }];
    let automatic_tax = CreateCheckoutSessionAutomaticTax {
        enabled: false,
        ..Default::default()
    };
    let customer_email = prefill_email(email);

    if embedded {
        CreateCheckoutSession {
            mode: Some(CheckoutSessionMode::Subscription),
            line_items: Some(line_items),
            billing_address_collection: Some(CheckoutSessionBillingAddressCollection::Auto),
            automatic_tax: Some(automatic_tax),
            customer_email,
            ui_mode: Some(CheckoutSessionUiMode::Embedded),
            return_url: Some(urls.return_to.as_str()),
            ..Default::default()
        }
    } else {
        CreateCheckoutSession {
            mode: Some(CheckoutSessionMode::Subscription),
            line_items: Some(line_items),
            billing_address_collection: Some(CheckoutSessionBillingAddressCollection::Auto),
            automatic_tax: Some(automatic_tax),
            customer_email,
            success_url: Some(urls.success.as_str()),
            cancel_url: Some(urls.cancel.as_str()),
            ..Default::default()
        }
    }
}

/// Creates a subscription checkout session with the payment provider.
/// The presentation mode comes from the process-wide configuration flag,
/// read once per request.
pub async fn create_checkout_session(
    client: &Client,
    config: &Config,
    price_id: &str,
    email: Option<&str>,
) -> Res<CheckoutSession> {
    let urls = CheckoutUrls::from_origin(&config.site_url);
    let params = assemble_params(price_id, email, &urls, config.checkout_embedded);
    CheckoutSession::create(client, params)
        .await
        .map_err(AppError::from)
}

/// Dispatch on the event's type tag. Verification already happened in
/// the route; every arm is the extension point for event-specific
/// handling, which is deliberately left as logging for now.
pub fn process_webhook_event(event: Event) {
    match event.type_ {
        EventType::CheckoutSessionCompleted => {
            if let EventObject::CheckoutSession(session) = event.data.object {
                info!("Checkout session completed: {}", session.id);
            }
        }
        EventType::CustomerSubscriptionCreated => {
            if let EventObject::Subscription(subscription) = event.data.object {
                info!("Subscription created: {}", subscription.id);
            }
        }
        EventType::CustomerSubscriptionUpdated => {
            if let EventObject::Subscription(subscription) = event.data.object {
                info!("Subscription updated: {}", subscription.id);
            }
        }
        EventType::CustomerSubscriptionDeleted => {
            if let EventObject::Subscription(subscription) = event.data.object {
                info!("Subscription deleted: {}", subscription.id);
            }
        }
        _ => {
            info!("Unhandled event type: {}", event.type_);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URLS_ORIGIN: &str = "https://example.test";

    #[test]
    fn hosted_params_carry_success_and_cancel_urls_only() {
        let urls = CheckoutUrls::from_origin(URLS_ORIGIN);
        let params = assemble_params("price_basic_123", Some("a@b.com"), &urls, false);

        assert_eq!(
            params.success_url,
            Some("https://example.test/subscriptions?status=success")
        );
        assert_eq!(
            params.cancel_url,
            Some("https://example.test/subscriptions?status=cancelled")
        );
        assert!(params.ui_mode.is_none());
        assert!(params.return_url.is_none());
    }

    #[test]
    fn embedded_params_carry_ui_mode_and_return_url_only() {
        let urls = CheckoutUrls::from_origin(URLS_ORIGIN);
        let params = assemble_params("price_basic_123", None, &urls, true);

        assert_eq!(params.ui_mode, Some(CheckoutSessionUiMode::Embedded));
        assert_eq!(
            params.return_url,
            Some(
                "https://example.test/subscriptions?status=success&session_id={CHECKOUT_SESSION_ID}"
            )
        );
        assert!(params.success_url.is_none());
        assert!(params.cancel_url.is_none());
    }

    #[test]
    fn params_request_one_subscription_line_item() {
        let urls = CheckoutUrls::from_origin(URLS_ORIGIN);
        let params = assemble_params("price_basic_123", None, &urls, false);

        assert_eq!(params.mode, Some(CheckoutSessionMode::Subscription));
        let line_items = params.line_items.unwrap();
        assert_eq!(line_items.len(), 1);
        assert_eq!(line_items[0].price.as_deref(), Some("price_basic_123"));
        assert_eq!(line_items[0].quantity, Some(1));
        assert!(!params.automatic_tax.unwrap().enabled);
        assert_eq!(
            params.billing_address_collection,
            Some(CheckoutSessionBillingAddressCollection::Auto)
        );
    }

    #[test]
    fn email_prefill_requires_an_at_sign_after_trimming() {
        assert_eq!(prefill_email(Some(" a@b.com ")), Some("a@b.com"));
        assert_eq!(prefill_email(Some("not-an-address")), None);
        assert_eq!(prefill_email(Some("   ")), None);
        assert_eq!(prefill_email(None), None);
    }

    #[test]
    fn trailing_slash_on_the_origin_does_not_double_up() {
        let urls = CheckoutUrls::from_origin("https://example.test/");
        assert_eq!(urls.success, "https://example.test/subscriptions?status=success");
    }
}
