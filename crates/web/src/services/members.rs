//! Signed-in member lookup.

use tracing::{debug, warn};

use deliveryhub_core::Member;

use crate::models::session::{TokenSource, keys};

/// Resolves the member behind a visitor's session.
///
/// There is no member endpoint yet, so any stored sign-in token maps to
/// [`Member::placeholder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberService;

impl MemberService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The signed-in member, or `None` when no token is stored.
    ///
    /// A storage failure is treated as signed out.
    pub async fn current_member(&self, source: &impl TokenSource) -> Option<Member> {
        match source.read_token(keys::AUTH_TOKEN).await {
            Ok(Some(token)) if !token.is_empty() => Some(Member::placeholder()),
            Ok(_) => {
                debug!("No sign-in token in session");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read sign-in token");
                None
            }
        }
    }
}
