//! Session-related types.
//!
//! The backend's bearer token is the only authentication state kept in the
//! session. It is written under two keys: `token` is what API calls read,
//! `authToken` is what the member lookup reads.

use std::fmt::Display;
use std::future::Future;

use secrecy::SecretString;
use tower_sessions::Session;
use tracing::warn;

/// Session keys for authentication data.
pub mod keys {
    /// Bearer token sent to the backend.
    pub const TOKEN: &str = "token";

    /// Sign-in marker read by the member lookup.
    pub const AUTH_TOKEN: &str = "authToken";
}

/// Per-visitor key/value storage holding sign-in tokens.
pub trait TokenSource: Send + Sync {
    type Error: Display + Send;

    /// Read the string stored under `key`.
    fn read_token(
        &self,
        key: &'static str,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;
}

impl TokenSource for Session {
    type Error = tower_sessions::session::Error;

    async fn read_token(&self, key: &'static str) -> Result<Option<String>, Self::Error> {
        self.get::<String>(key).await
    }
}

/// Bearer token for backend calls: `token`, falling back to `authToken`.
///
/// Storage failures are logged and treated as no token.
pub async fn bearer_token(source: &impl TokenSource) -> Option<SecretString> {
    for key in [keys::TOKEN, keys::AUTH_TOKEN] {
        match source.read_token(key).await {
            Ok(Some(token)) if !token.is_empty() => return Some(SecretString::from(token)),
            Ok(_) => {}
            Err(e) => warn!(key, error = %e, "Failed to read token from session"),
        }
    }
    None
}
