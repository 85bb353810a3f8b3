use std::sync::Arc;

use url::Url;

use identity::provider::IdentityProvider;

use crate::navigate::{Navigator, resolve_redirect_target};

/// Message shown after a successful account creation. Sign-up does not
/// log the user in; they are switched to the sign-in form instead.
pub const SIGN_UP_CONFIRMATION: &str = "Account created! Please log in.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Email/password form with a two-state toggle. Provider errors are
/// shown inline, verbatim; a successful sign-in navigates to the
/// resolved redirect target.
pub struct AuthForm<P, N> {
    identity: Arc<P>,
    navigator: Arc<N>,
    next_path: Option<String>,
    location: Option<Url>,
    mode: AuthMode,
    message: Option<String>,
}

impl<P, N> AuthForm<P, N>
where
    P: IdentityProvider,
    N: Navigator,
{
    pub fn new(
        identity: Arc<P>,
        navigator: Arc<N>,
        next_path: Option<String>,
        location: Option<Url>,
    ) -> Self {
        AuthForm {
            identity,
            navigator,
            next_path,
            location,
            mode: AuthMode::SignIn,
            message: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Switch between sign-in and sign-up. Clears any prior message.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.message = None;
    }

    pub async fn submit(&mut self, email: &str, password: &str) {
        self.message = None;

        match self.mode {
            AuthMode::SignUp => match self.identity.sign_up(email, password).await {
                Ok(()) => {
                    self.message = Some(SIGN_UP_CONFIRMATION.to_string());
                    self.mode = AuthMode::SignIn;
                }
                Err(error) => {
                    self.message = Some(error.to_string());
                }
            },
            AuthMode::SignIn => match self.identity.sign_in(email, password).await {
                Ok(_session) => {
                    self.message = None;
                    let target =
                        resolve_redirect_target(self.next_path.as_deref(), self.location.as_ref());
                    self.navigator.push(&target);
                }
                Err(error) => {
                    self.message = Some(error.to_string());
                }
            },
        }
    }
}
