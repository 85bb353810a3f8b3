use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server: the public site origin,
/// the payment-provider credentials and checkout presentation mode,
/// the plan price identifiers, the identity-provider endpoint, server
/// host and port, number of worker threads, CORS settings and logging
/// preferences.
pub struct Config {
    /// The public origin of the site. All checkout success, cancel and
    /// return URLs are rooted at this origin.
    pub site_url: String,
    /// Whether checkout is presented embedded (widget driven by a client
    /// secret) instead of hosted (full-page redirect). Process-wide; never
    /// varied per request.
    pub checkout_embedded: bool,
    /// Stripe secret key.
    pub stripe_secret_key: String,
    /// Stripe publishable key. May be empty, in which case embedded
    /// mounting degrades to a logged no-op.
    pub stripe_publishable_key: String,
    /// Stripe webhook signing secret.
    pub stripe_webhook_secret: String,
    /// Price identifier of the Basic plan. Empty disables the plan action.
    pub price_basic: String,
    /// Price identifier of the Pro plan. Empty disables the plan action.
    pub price_pro: String,
    /// Base URL of the identity provider.
    pub identity_url: String,
    /// Public (anon) key of the identity provider, sent as `apikey` header.
    pub identity_public_key: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Loads all configuration values from environment variables with
    /// sensible defaults for the optional settings.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `STRIPE_SECRET_KEY`: Payment provider secret key
    /// - `STRIPE_WEBHOOK_SECRET`: Webhook signing secret
    /// - `IDENTITY_URL`: Identity provider base URL
    /// - `IDENTITY_PUBLIC_KEY`: Identity provider public key
    ///
    /// Optional (with defaults):
    /// - `SITE_URL`: Public site origin (default: "http://localhost:3000")
    /// - `STRIPE_CHECKOUT_EMBEDDED`: "true" selects embedded checkout (default: hosted)
    /// - `STRIPE_PUBLISHABLE_KEY`: Publishable key (default: empty)
    /// - `PRICE_BASIC`, `PRICE_PRO`: Plan price identifiers (default: empty)
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are
    /// missing or if numeric values cannot be parsed correctly.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            site_url: env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            checkout_embedded: env::var("STRIPE_CHECKOUT_EMBEDDED")
                .unwrap_or_default()
                .to_lowercase()
                == "true",
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")
                .expect("STRIPE_SECRET_KEY must be set"),
            stripe_publishable_key: env::var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default(),
            stripe_webhook_secret: env::var("STRIPE_WEBHOOK_SECRET")
                .expect("STRIPE_WEBHOOK_SECRET must be set"),
            price_basic: env::var("PRICE_BASIC").unwrap_or_default(),
            price_pro: env::var("PRICE_PRO").unwrap_or_default(),
            identity_url: env::var("IDENTITY_URL").expect("IDENTITY_URL must be set"),
            identity_public_key: env::var("IDENTITY_PUBLIC_KEY")
                .expect("IDENTITY_PUBLIC_KEY must be set"),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
        })
    }
}
