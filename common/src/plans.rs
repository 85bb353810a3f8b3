use serde::Serialize;

use crate::env_config::Config;

/// A subscription plan as shown on the pricing page. Defined at
/// configuration time and immutable afterwards; the price identifier is
/// an opaque reference to a provider-side pricing plan.
#[derive(Clone, Debug, Serialize)]
pub struct Plan {
    pub name: &'static str,
    pub bullets: &'static [&'static str],
    pub price_id: String,
    pub highlight: bool,
}

/// Build the static plan catalog from configuration. A plan with an
/// empty price identifier stays visible but its subscribe action is a
/// no-op.
pub fn catalog(config: &Config) -> Vec<Plan> {
    vec![
        Plan {
            name: "Basic",
            bullets: &[
                "Starter website setup",
                "Email support",
                "Monthly maintenance updates",
                "Core analytics snapshot",
            ],
            price_id: config.price_basic.clone(),
            highlight: false,
        },
        Plan {
            name: "Pro",
            bullets: &[
                "Custom design & components",
                "Priority support",
                "Weekly maintenance updates",
                "Advanced analytics & dashboards",
            ],
            price_id: config.price_pro.clone(),
            highlight: true,
        },
    ]
}
