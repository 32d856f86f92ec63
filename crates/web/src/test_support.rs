//! In-process fake of the delivery backend for tests.
//!
//! Serves the auth and role-registration endpoints on an ephemeral port and
//! records every call so tests can assert on what was sent.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use deliveryhub_core::{
    PendingRegistrations, RegistrationType, RoleId, RoleRegistration, UserId, UserRoleId,
};

#[derive(Default)]
struct FakeState {
    pending: PendingRegistrations,
    fail_all: Option<StatusCode>,
    fail_mutations: Option<StatusCode>,
    calls: Vec<String>,
    last_authorization: Option<String>,
}

/// Handle to a running fake backend.
#[derive(Clone)]
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct Reason {
    reason: String,
}

impl FakeBackend {
    pub const ADMIN_EMAIL: &'static str = "admin@deliveryhub.vn";
    pub const ADMIN_PASSWORD: &'static str = "s3cret-pass";
    pub const TOKEN: &'static str = "fake-jwt-token";

    /// Start the fake on an ephemeral port.
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let backend = Self {
            addr: listener.local_addr().unwrap(),
            state: Arc::new(Mutex::new(FakeState::default())),
        };

        let router = Router::new()
            .route("/admin/role-registrations/pending", get(pending))
            .route("/admin/role-registrations/{id}/approve", put(approve))
            .route("/admin/role-registrations/{id}/reject", put(reject))
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/auth/logout", post(logout))
            .with_state(backend.clone());

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        backend
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn set_pending(&self, merchants: Vec<RoleRegistration>, shippers: Vec<RoleRegistration>) {
        self.state.lock().unwrap().pending = PendingRegistrations {
            merchants,
            shippers,
        };
    }

    /// Fail every role-registration endpoint with `status`.
    pub fn fail_with(&self, status: StatusCode) {
        self.state.lock().unwrap().fail_all = Some(status);
    }

    /// Fail approve/reject with `status`; loading still works.
    pub fn fail_mutations_with(&self, status: StatusCode) {
        self.state.lock().unwrap().fail_mutations = Some(status);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.state.lock().unwrap().last_authorization.clone()
    }

    pub fn merchant(id: i32) -> RoleRegistration {
        RoleRegistration {
            shop_name: Some(format!("Shop {id}")),
            shop_address: Some(format!("{id} Nguyen Hue")),
            shop_phone: None,
            ..Self::registration(id, RegistrationType::Merchant)
        }
    }

    pub fn shipper(id: i32) -> RoleRegistration {
        RoleRegistration {
            vehicle_type: Some("motorbike".to_string()),
            license_plate: Some(format!("59-X1 {id:03}")),
            ..Self::registration(id, RegistrationType::Shipper)
        }
    }

    fn registration(id: i32, registration_type: RegistrationType) -> RoleRegistration {
        RoleRegistration {
            user_role_id: UserRoleId::new(id),
            user_id: UserId::new(100 + id),
            role_id: RoleId::new(match registration_type {
                RegistrationType::Merchant => 3,
                RegistrationType::Shipper => 4,
            }),
            full_name: format!("Applicant {id}"),
            email: format!("applicant{id}@example.com"),
            phone: "0901234567".to_string(),
            created_at: "Tue, 14 Oct 2025 08:30:00 GMT".to_string(),
            registration_type,
            shop_name: None,
            shop_address: None,
            shop_phone: None,
            business_license: None,
            vehicle_type: None,
            license_plate: None,
            id_card_number: None,
        }
    }

    fn record(&self, call: String, headers: &HeaderMap) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.last_authorization = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
    }

    fn remove(&self, id: i32) {
        let mut state = self.state.lock().unwrap();
        state.pending.merchants.retain(|r| r.user_role_id.as_i32() != id);
        state.pending.shippers.retain(|r| r.user_role_id.as_i32() != id);
    }

    fn failure(&self, mutation: bool) -> Option<StatusCode> {
        let state = self.state.lock().unwrap();
        state
            .fail_all
            .or(if mutation { state.fail_mutations } else { None })
    }
}

async fn pending(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    backend.record("GET /admin/role-registrations/pending".to_string(), &headers);
    if let Some(status) = backend.failure(false) {
        return status.into_response();
    }
    let pending = backend.state.lock().unwrap().pending.clone();
    Json(pending).into_response()
}

async fn approve(
    State(backend): State<FakeBackend>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    backend.record(format!("PUT /admin/role-registrations/{id}/approve"), &headers);
    if let Some(status) = backend.failure(true) {
        return status.into_response();
    }
    backend.remove(id);
    Json(json!({"ok": true})).into_response()
}

async fn reject(
    State(backend): State<FakeBackend>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(body): Json<Reason>,
) -> Response {
    backend.record(
        format!(
            "PUT /admin/role-registrations/{id}/reject reason={}",
            body.reason
        ),
        &headers,
    );
    if let Some(status) = backend.failure(true) {
        return status.into_response();
    }
    backend.remove(id);
    Json(json!({"ok": true})).into_response()
}

async fn login(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Credentials>,
) -> Response {
    backend.record(format!("POST /auth/login email={}", body.email), &headers);
    if body.email == FakeBackend::ADMIN_EMAIL && body.password == FakeBackend::ADMIN_PASSWORD {
        Json(json!({
            "ok": true,
            "token": FakeBackend::TOKEN,
            "user": {"user_id": 1, "username": "admin", "email": body.email, "role_id": 1}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn register(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Credentials>,
) -> Response {
    backend.record(format!("POST /auth/register email={}", body.email), &headers);
    if body.email == FakeBackend::ADMIN_EMAIL {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"ok": false, "error": "email already registered"})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({"ok": true, "user": {"user_id": 2, "email": body.email}})),
    )
        .into_response()
}

async fn logout(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    backend.record("POST /auth/logout".to_string(), &headers);
    Json(json!({"ok": true, "message": "Logged out"})).into_response()
}
