//! Backend operations the approval panel depends on.

use std::future::Future;

use secrecy::SecretString;

use deliveryhub_core::{PendingRegistrations, UserRoleId};

use crate::backend::{BackendClient, BackendError};

/// Role-registration endpoints of the delivery backend.
///
/// [`BackendClient`] is the production implementation; tests substitute an
/// in-memory fake.
pub trait RegistrationApi: Send + Sync {
    /// Fetch every pending registration.
    fn pending(
        &self,
        token: Option<&SecretString>,
    ) -> impl Future<Output = Result<PendingRegistrations, BackendError>> + Send;

    /// Approve one registration.
    fn approve(
        &self,
        id: UserRoleId,
        token: Option<&SecretString>,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Reject one registration with a reason.
    fn reject(
        &self,
        id: UserRoleId,
        reason: &str,
        token: Option<&SecretString>,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

impl RegistrationApi for BackendClient {
    async fn pending(
        &self,
        token: Option<&SecretString>,
    ) -> Result<PendingRegistrations, BackendError> {
        self.pending_registrations(token).await
    }

    async fn approve(
        &self,
        id: UserRoleId,
        token: Option<&SecretString>,
    ) -> Result<(), BackendError> {
        self.approve_registration(id, token).await
    }

    async fn reject(
        &self,
        id: UserRoleId,
        reason: &str,
        token: Option<&SecretString>,
    ) -> Result<(), BackendError> {
        self.reject_registration(id, reason, token).await
    }
}
