//! Member guard for dashboard routes.
//!
//! [`decide`] is the pure rule; [`require_member`] wires it into the router
//! as `middleware::from_fn_with_state(MemberGuard::new(role, &state), require_member)`
//! and hands the member to handlers through [`CurrentMember`].

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::Session;
use tracing::debug;

use deliveryhub_core::{DashboardRole, Member};

use crate::models::session::keys;
use crate::services::MemberService;
use crate::state::AppState;

/// Outcome of checking a visitor against a dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the dashboard for this member.
    Allow(Member),
    /// Send the visitor to this sign-in URL.
    Redirect(String),
}

/// Sign-in URL carrying the dashboard's localized prompt.
#[must_use]
pub fn sign_in_url(role: DashboardRole) -> String {
    format!(
        "/auth/login?message={}",
        urlencoding::encode(role.sign_in_prompt())
    )
}

/// Decide whether a visitor may see `role`'s dashboard.
#[must_use]
pub fn decide(member: Option<Member>, role: DashboardRole) -> GuardDecision {
    match member {
        Some(member) => GuardDecision::Allow(member),
        None => GuardDecision::Redirect(sign_in_url(role)),
    }
}

/// State of one guarded dashboard route.
#[derive(Debug, Clone, Copy)]
pub struct MemberGuard {
    role: DashboardRole,
    members: MemberService,
}

impl MemberGuard {
    /// Guard `role`'s dashboard with the application's member lookup.
    #[must_use]
    pub fn new(role: DashboardRole, state: &AppState) -> Self {
        Self {
            role,
            members: *state.members(),
        }
    }
}

/// Middleware that redirects signed-out visitors to the sign-in page.
pub async fn require_member(
    State(guard): State<MemberGuard>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let member = guard.members.current_member(&session).await;

    match decide(member, guard.role) {
        GuardDecision::Allow(member) => {
            request.extensions_mut().insert(CurrentMember(member));
            next.run(request).await
        }
        GuardDecision::Redirect(to) => {
            debug!(role = %guard.role, "Signed-out visitor sent to sign-in");
            Redirect::to(&to).into_response()
        }
    }
}

/// Extractor for the member admitted by [`require_member`].
///
/// Only usable on guarded routes; elsewhere it redirects to sign-in.
#[derive(Debug, Clone)]
pub struct CurrentMember(pub Member);

impl<S> FromRequestParts<S> for CurrentMember
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| Redirect::to("/auth/login"))
    }
}

/// Store a freshly issued token under both session keys.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store_tokens(
    session: &Session,
    token: &SecretString,
) -> Result<(), tower_sessions::session::Error> {
    // New sign-in, new session ID
    session.cycle_id().await?;
    session.insert(keys::TOKEN, token.expose_secret()).await?;
    session
        .insert(keys::AUTH_TOKEN, token.expose_secret())
        .await
}

/// Remove both token keys (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_tokens(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<String>(keys::TOKEN).await?;
    session.remove::<String>(keys::AUTH_TOKEN).await?;
    Ok(())
}
