//! Request and response bodies of the delivery backend.

use serde::{Deserialize, Serialize};

use deliveryhub_core::{RoleId, UserId};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub full_name: String,
    pub password: String,
    /// Role name; the backend defaults to `customer`.
    pub role: String,
}

/// Body of `PUT /admin/role-registrations/{id}/reject`.
#[derive(Debug, Clone, Serialize)]
pub struct RejectRequest<'a> {
    pub reason: &'a str,
}

/// User record returned by the auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendUser {
    pub user_id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role_id: Option<RoleId>,
}

/// Envelope shared by the auth endpoints: `{ ok, token?, user?, error? }`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<BackendUser>,
    #[serde(default)]
    pub error: Option<String>,
}
