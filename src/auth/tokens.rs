use crate::auth::repo_types::User;

pub const PLACEHOLDER_TOKEN: &str = "placeholder-session-token";

/// Produces the session credential handed back by a successful login.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> String;
}

/// Returns the same opaque string for everyone. It authenticates nothing;
/// swap in a signed, expiring issuer before relying on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTokens;

impl TokenIssuer for PlaceholderTokens {
    fn issue(&self, _user: &User) -> String {
        PLACEHOLDER_TOKEN.to_string()
    }
}
