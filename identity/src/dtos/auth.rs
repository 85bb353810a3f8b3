use serde::{Deserialize, Serialize};

use crate::provider::AuthUser;

#[derive(Debug, Serialize)]
pub struct CredentialsRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub user: UserPayload,
}

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
}

impl From<UserPayload> for AuthUser {
    fn from(payload: UserPayload) -> Self {
        AuthUser {
            id: payload.id,
            email: payload.email,
            full_name: payload.user_metadata.full_name,
        }
    }
}

/// Error body shapes the provider emits. Which field carries the message
/// varies by endpoint; the first present one wins.
#[derive(Debug, Deserialize)]
pub struct ProviderError {
    pub error_description: Option<String>,
    pub msg: Option<String>,
    pub message: Option<String>,
}

impl ProviderError {
    pub fn into_message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .unwrap_or_else(|| "Identity provider request failed".to_string())
    }
}
