//! Delivery backend REST client.
//!
//! Thin wrapper over `reqwest` for the endpoints this site consumes. Bearer
//! tokens are passed per call; the client itself holds no credentials.

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use deliveryhub_core::{PendingRegistrations, UserRoleId};

use super::error::BackendError;
use super::types::{AuthResponse, LoginRequest, RegisterRequest, RejectRequest};

/// Client for the delivery backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// HTTP client.
    client: Client,
    /// Base URL, without trailing slash.
    base: String,
}

impl BackendClient {
    /// Create a new client for the backend at `base`.
    #[must_use]
    pub fn new(base: &Url) -> Self {
        Self {
            client: Client::new(),
            base: base.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    // =========================================================================
    // Role registrations
    // =========================================================================

    /// Fetch pending merchant and shipper registrations.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` ("Failed to load") on a non-success
    /// status, or a request/response error.
    #[instrument(skip(self, token))]
    pub async fn pending_registrations(
        &self,
        token: Option<&SecretString>,
    ) -> Result<PendingRegistrations, BackendError> {
        let response = send(authorize(
            self.client.get(self.url("/admin/role-registrations/pending")),
            token,
        ))
        .await?;

        let response = ensure_success(response, "Failed to load")?;
        let pending: PendingRegistrations = decode(response).await?;

        debug!(
            merchants = pending.merchants.len(),
            shippers = pending.shippers.len(),
            "Loaded pending role registrations"
        );
        Ok(pending)
    }

    /// Approve a pending registration.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` ("Failed to approve") on a non-success
    /// status, or a request error.
    #[instrument(skip(self, token), fields(user_role_id = %id))]
    pub async fn approve_registration(
        &self,
        id: UserRoleId,
        token: Option<&SecretString>,
    ) -> Result<(), BackendError> {
        let response = send(authorize(
            self.client
                .put(self.url(&format!("/admin/role-registrations/{id}/approve"))),
            token,
        ))
        .await?;

        ensure_success(response, "Failed to approve")?;
        debug!("Role registration approved");
        Ok(())
    }

    /// Reject a pending registration with a reason.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` ("Failed to reject") on a non-success
    /// status, or a request error.
    #[instrument(skip(self, reason, token), fields(user_role_id = %id))]
    pub async fn reject_registration(
        &self,
        id: UserRoleId,
        reason: &str,
        token: Option<&SecretString>,
    ) -> Result<(), BackendError> {
        let response = send(
            authorize(
                self.client
                    .put(self.url(&format!("/admin/role-registrations/{id}/reject"))),
                token,
            )
            .json(&RejectRequest { reason }),
        )
        .await?;

        ensure_success(response, "Failed to reject")?;
        debug!("Role registration rejected");
        Ok(())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Sign in with email and password; returns the issued bearer token.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` carrying the backend's `error` text
    /// when the credentials are refused.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<SecretString, BackendError> {
        let response = send(self.client.post(self.url("/auth/login")).json(request)).await?;
        let auth = auth_envelope(response, "Đăng nhập thất bại").await?;

        auth.token
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
            .ok_or_else(|| BackendError::Response("login response carried no token".to_string()))
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` carrying the backend's `error` text
    /// when registration is refused.
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, BackendError> {
        let response = send(self.client.post(self.url("/auth/register")).json(request)).await?;
        auth_envelope(response, "Đăng ký thất bại").await
    }

    /// Revoke a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or cannot be reached.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &SecretString) -> Result<(), BackendError> {
        let response = send(authorize(
            self.client.post(self.url("/auth/logout")),
            Some(token),
        ))
        .await?;
        ensure_success(response, "Failed to log out")?;
        Ok(())
    }
}

/// Attach a bearer token when one is available.
fn authorize(request: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token.expose_secret()),
        None => request,
    }
}

async fn send(request: RequestBuilder) -> Result<Response, BackendError> {
    request.send().await.map_err(|e| {
        warn!(error = %e, "Backend unreachable");
        BackendError::Request(e.to_string())
    })
}

/// Map a non-success status to a rejection with a fixed message.
fn ensure_success(response: Response, message: &str) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(status = %status, url = %response.url(), "Backend request failed");
        Err(BackendError::rejected(status, message))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response.json().await.map_err(|e| {
        warn!(error = %e, "Backend response could not be decoded");
        BackendError::Response(e.to_string())
    })
}

/// Decode an auth envelope, turning `ok: false` or an error status into a
/// rejection that carries the backend's message.
async fn auth_envelope(response: Response, fallback: &str) -> Result<AuthResponse, BackendError> {
    let status = response.status();
    let body: AuthResponse = decode(response).await?;

    if status.is_success() && body.ok {
        return Ok(body);
    }

    warn!(status = %status, error = ?body.error, "Backend refused auth request");
    Err(BackendError::rejected(
        status,
        body.error.unwrap_or_else(|| fallback.to_string()),
    ))
}
