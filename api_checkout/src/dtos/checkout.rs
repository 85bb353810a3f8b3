use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    #[serde(rename = "priceId")]
    pub price_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    pub id: String,
    /// Present only for embedded checkout.
    #[serde(rename = "clientSecret")]
    pub client_secret: Option<String>,
    /// Present only for hosted checkout.
    pub url: Option<String>,
}
