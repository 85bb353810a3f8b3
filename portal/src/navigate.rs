use url::Url;

/// Default landing path after sign-in.
pub const DEFAULT_REDIRECT: &str = "/subscriptions";

/// Navigation side-effect seam. Views issue redirects through this
/// instead of touching a router directly, so flows stay testable.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Path of the auth view, carrying the place to come back to.
pub fn auth_path(return_to: &str) -> String {
    format!("/auth?next={}", return_to)
}

/// Resolve where to send the user after sign-in, first match wins:
/// an explicitly supplied next path, the `next` query parameter of the
/// current location, then the default. Only same-origin relative paths
/// (leading `/`) qualify; anything else is discarded, which blocks open
/// redirects to external hosts.
pub fn resolve_redirect_target(next_path: Option<&str>, location: Option<&Url>) -> String {
    fn is_safe(path: &str) -> bool {
        path.starts_with('/')
    }

    if let Some(path) = next_path {
        if is_safe(path) {
            return path.to_string();
        }
    }

    if let Some(location) = location {
        if let Some((_, next)) = location.query_pairs().find(|(key, _)| key == "next") {
            if is_safe(&next) {
                return next.into_owned();
            }
        }
    }

    DEFAULT_REDIRECT.to_string()
}
