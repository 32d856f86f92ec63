//! Admin dashboard with the role-approval panel.
//!
//! The panel is rebuilt per request from the backend. Approve and reject are
//! form posts; a completed action renders the refreshed panel directly so the
//! pending list is fetched once per mutation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use deliveryhub_core::{DashboardRole, Member, RegistrationType, RoleRegistration, UserRoleId};

use crate::approvals::{ActionOutcome, Confirmation, PanelState, RegistrationApi, RoleApprovals};
use crate::backend::BackendClient;
use crate::error::{add_breadcrumb, set_sentry_user};
use crate::filters;
use crate::middleware::CurrentMember;
use crate::models::bearer_token;
use crate::state::AppState;

// =============================================================================
// Query and Form Types
// =============================================================================

/// Query parameters of the admin dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub tab: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Approve form data. The checkbox stands in for a confirmation prompt.
#[derive(Debug, Deserialize)]
pub struct ApproveForm {
    pub confirm: Option<String>,
    pub tab: Option<String>,
}

impl ApproveForm {
    fn confirmation(&self) -> Confirmation {
        Confirmation::from(self.confirm.as_deref() == Some("yes"))
    }
}

/// Reject form data.
#[derive(Debug, Deserialize)]
pub struct RejectForm {
    pub reason: Option<String>,
    pub tab: Option<String>,
}

/// Parse a tab name, falling back to the merchant list.
fn parse_tab(tab: Option<&str>) -> RegistrationType {
    tab.and_then(|t| t.parse().ok()).unwrap_or_default()
}

/// Admin dashboard URL for a tab, optionally carrying an error alert.
fn admin_url(tab: RegistrationType, error: Option<&str>) -> String {
    let base = format!("{}?tab={}", DashboardRole::Admin.path(), tab.as_str());
    match error {
        Some(error) => format!("{base}&error={}", urlencoding::encode(error)),
        None => base,
    }
}

// =============================================================================
// Templates
// =============================================================================

/// One tab button of the panel.
#[derive(Debug, Clone)]
pub struct TabView {
    pub value: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub selected: bool,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/admin.html")]
pub struct AdminTemplate {
    pub role: DashboardRole,
    pub dashboards: &'static [DashboardRole],
    pub member: Member,
    pub notice: Option<String>,
    pub error: Option<String>,
    /// `true` when nothing is pending.
    pub empty: bool,
    pub total: usize,
    pub tab: &'static str,
    pub tabs: Vec<TabView>,
    pub cards: Vec<RoleRegistration>,
}

impl AdminTemplate {
    fn new<A: RegistrationApi>(
        member: Member,
        panel: &RoleApprovals<A>,
        notice: Option<String>,
        error: Option<String>,
    ) -> Self {
        let pending = panel.pending();
        let tabs = RegistrationType::ALL
            .into_iter()
            .map(|t| TabView {
                value: t.as_str(),
                label: t.plural_label(),
                count: pending.for_type(t).len(),
                selected: t == panel.tab(),
            })
            .collect();

        Self {
            role: DashboardRole::Admin,
            dashboards: &DashboardRole::ALL,
            member,
            notice,
            // A failed reload is reported even when the action itself succeeded
            error: error.or_else(|| panel.load_error().map(String::from)),
            empty: !matches!(panel.state(), PanelState::Populated { .. }),
            total: pending.total(),
            tab: panel.tab().as_str(),
            tabs,
            cards: panel.selected().to_vec(),
        }
    }
}

async fn panel(
    state: &AppState,
    session: &Session,
    tab: RegistrationType,
) -> RoleApprovals<BackendClient> {
    RoleApprovals::new(state.backend().clone(), bearer_token(session).await).with_tab(tab)
}

/// Map an action outcome to a response.
fn respond<A: RegistrationApi>(
    member: Member,
    panel: &RoleApprovals<A>,
    outcome: ActionOutcome,
) -> Response {
    match outcome {
        ActionOutcome::Completed(notice) => {
            AdminTemplate::new(member, panel, Some(notice.to_string()), None).into_response()
        }
        ActionOutcome::Cancelled => Redirect::to(&admin_url(panel.tab(), None)).into_response(),
        ActionOutcome::Failed(alert) => {
            Redirect::to(&admin_url(panel.tab(), Some(&alert))).into_response()
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the admin dashboard.
#[instrument(skip_all)]
pub async fn admin(
    State(state): State<AppState>,
    CurrentMember(member): CurrentMember,
    session: Session,
    Query(query): Query<AdminQuery>,
) -> AdminTemplate {
    set_sentry_user(&member.id, Some(member.email.as_str()));

    let mut panel = panel(&state, &session, parse_tab(query.tab.as_deref())).await;
    panel.load().await;

    AdminTemplate::new(member, &panel, query.notice, query.error)
}

/// Approve a pending registration.
#[instrument(skip(state, member, session, form), fields(user_role_id = %id))]
pub async fn approve(
    State(state): State<AppState>,
    CurrentMember(member): CurrentMember,
    session: Session,
    Path(id): Path<UserRoleId>,
    Form(form): Form<ApproveForm>,
) -> Response {
    let mut panel = panel(&state, &session, parse_tab(form.tab.as_deref())).await;
    let outcome = panel.approve(id, form.confirmation()).await;

    if matches!(outcome, ActionOutcome::Completed(_)) {
        let id = id.to_string();
        add_breadcrumb(
            "approvals",
            "Approved registration",
            Some(&[("user_role_id", id.as_str())][..]),
        );
    }
    respond(member, &panel, outcome)
}

/// Reject a pending registration with a reason.
#[instrument(skip(state, member, session, form), fields(user_role_id = %id))]
pub async fn reject(
    State(state): State<AppState>,
    CurrentMember(member): CurrentMember,
    session: Session,
    Path(id): Path<UserRoleId>,
    Form(form): Form<RejectForm>,
) -> Response {
    let mut panel = panel(&state, &session, parse_tab(form.tab.as_deref())).await;
    let outcome = panel.reject(id, form.reason.as_deref()).await;

    if matches!(outcome, ActionOutcome::Completed(_)) {
        let id = id.to_string();
        add_breadcrumb(
            "approvals",
            "Rejected registration",
            Some(&[("user_role_id", id.as_str())][..]),
        );
    }
    respond(member, &panel, outcome)
}
