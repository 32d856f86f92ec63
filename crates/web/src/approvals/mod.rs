//! Role-approval panel.
//!
//! Holds one snapshot of the pending merchant and shipper registrations and
//! drives approve/reject against the backend. Every successful mutation is
//! followed by exactly one reload so the snapshot reflects the backend.

mod api;

pub use api::RegistrationApi;

use secrecy::SecretString;
use tracing::{error, info, instrument};

use deliveryhub_core::{PendingRegistrations, RegistrationType, RoleRegistration, UserRoleId};

/// Alert shown after a successful approval.
pub const APPROVED: &str = "Registration approved";
/// Alert shown after a successful rejection.
pub const REJECTED: &str = "Registration rejected";

/// Lifecycle of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// A fetch is in flight (or none has happened yet).
    Loading,
    /// Nothing is pending.
    Empty,
    /// At least one registration is pending; `tab` is the visible list.
    Populated { tab: RegistrationType },
}

/// Whether the operator confirmed an approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Result of an approve or reject action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The operator backed out; no request was sent.
    Cancelled,
    /// The backend accepted the change and the list was reloaded.
    Completed(&'static str),
    /// The backend refused or could not be reached; the snapshot is unchanged.
    Failed(String),
}

/// Server-side model of the admin approval panel.
pub struct RoleApprovals<A> {
    api: A,
    token: Option<SecretString>,
    pending: PendingRegistrations,
    tab: RegistrationType,
    state: PanelState,
    load_error: Option<String>,
}

impl<A: RegistrationApi> RoleApprovals<A> {
    /// Create a panel that calls `api` with the operator's bearer token.
    pub fn new(api: A, token: Option<SecretString>) -> Self {
        Self {
            api,
            token,
            pending: PendingRegistrations::default(),
            tab: RegistrationType::default(),
            state: PanelState::Loading,
            load_error: None,
        }
    }

    /// Choose the list shown once populated.
    #[must_use]
    pub fn with_tab(mut self, tab: RegistrationType) -> Self {
        self.select_tab(tab);
        self
    }

    /// Switch the visible list.
    pub fn select_tab(&mut self, tab: RegistrationType) {
        self.tab = tab;
        if let PanelState::Populated { .. } = self.state {
            self.state = PanelState::Populated { tab };
        }
    }

    /// Fetch the pending registrations and regroup them by type.
    ///
    /// A failure is logged and recorded; the previous snapshot stays.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.state = PanelState::Loading;

        match self.api.pending(self.token.as_ref()).await {
            Ok(pending) => {
                self.pending = pending.regrouped();
                self.load_error = None;
            }
            Err(e) => {
                error!(error = %e, "Failed to load pending role registrations");
                self.load_error = Some(e.to_string());
            }
        }

        self.state = if self.pending.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Populated { tab: self.tab }
        };
    }

    /// Approve a registration once the operator has confirmed.
    #[instrument(skip(self), fields(user_role_id = %id))]
    pub async fn approve(&mut self, id: UserRoleId, confirmation: Confirmation) -> ActionOutcome {
        if confirmation == Confirmation::Declined {
            return ActionOutcome::Cancelled;
        }

        match self.api.approve(id, self.token.as_ref()).await {
            Ok(()) => {
                info!("Role registration approved");
                self.load().await;
                ActionOutcome::Completed(APPROVED)
            }
            Err(e) => {
                error!(error = %e, "Failed to approve role registration");
                ActionOutcome::Failed(e.to_string())
            }
        }
    }

    /// Reject a registration.
    ///
    /// The reason is trimmed before it is sent. A missing reason, or one that
    /// is blank after trimming, cancels without a request.
    #[instrument(skip(self, reason), fields(user_role_id = %id))]
    pub async fn reject(&mut self, id: UserRoleId, reason: Option<&str>) -> ActionOutcome {
        let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) else {
            return ActionOutcome::Cancelled;
        };

        match self.api.reject(id, reason, self.token.as_ref()).await {
            Ok(()) => {
                info!("Role registration rejected");
                self.load().await;
                ActionOutcome::Completed(REJECTED)
            }
            Err(e) => {
                error!(error = %e, "Failed to reject role registration");
                ActionOutcome::Failed(e.to_string())
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    #[must_use]
    pub const fn tab(&self) -> RegistrationType {
        self.tab
    }

    #[must_use]
    pub const fn pending(&self) -> &PendingRegistrations {
        &self.pending
    }

    /// Registrations in the visible tab.
    #[must_use]
    pub fn selected(&self) -> &[RoleRegistration] {
        self.pending.for_type(self.tab)
    }

    /// Alert text of the last failed load, if it failed.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}
