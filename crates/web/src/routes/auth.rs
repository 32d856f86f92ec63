//! Authentication route handlers.
//!
//! Sign-in, registration and sign-out are delegated to the delivery backend.
//! The token it issues is kept in the server-side session only.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use deliveryhub_core::Email;

use crate::backend::{BackendError, LoginRequest, RegisterRequest};
use crate::error::{AppError, clear_sentry_user};
use crate::filters;
use crate::middleware::{clear_tokens, store_tokens};
use crate::models::bearer_token;
use crate::state::AppState;

/// Roles a visitor may register for.
pub const REGISTER_ROLES: &[(&str, &str)] = &[
    ("customer", "Khách hàng"),
    ("shipper", "Tài xế"),
    ("merchant", "Người bán"),
];

/// Notice shown on the sign-in page after registering.
const REGISTERED_NOTICE: &str = "Đăng ký thành công. Vui lòng đăng nhập.";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub full_name: String,
    pub password: String,
    pub role: Option<String>,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for prompt/error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    /// Prompt set by the dashboard guard.
    pub message: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub message: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
}

/// A role radio button on the register page.
#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

fn role_options(selected: &str) -> Vec<RoleOption> {
    REGISTER_ROLES
        .iter()
        .map(|&(value, label)| RoleOption {
            value,
            label,
            checked: value == selected,
        })
        .collect()
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub roles: Vec<RoleOption>,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub full_name: String,
}

impl RegisterTemplate {
    fn blank(error: Option<String>) -> Self {
        Self {
            error,
            roles: role_options("customer"),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            full_name: String::new(),
        }
    }

    /// Re-render a submitted form with an error, keeping what was typed.
    fn refill(form: RegisterForm, error: String) -> Self {
        Self {
            error: Some(error),
            roles: role_options(form.role.as_deref().unwrap_or("customer")),
            username: form.username,
            email: form.email,
            phone: form.phone,
            full_name: form.full_name,
        }
    }
}

/// Status for re-rendering a form after the backend refused it.
fn refusal_status(err: &BackendError) -> StatusCode {
    err.status()
        .filter(StatusCode::is_client_error)
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    let success = match query.success.as_deref() {
        Some("registered") => Some(REGISTERED_NOTICE.to_string()),
        _ => query.success,
    };

    LoginTemplate {
        message: query.message,
        error: query.error,
        success,
        email: String::new(),
    }
}

/// Handle login form submission.
///
/// On success the backend token is stored in the session and the visitor
/// lands on the home page.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let request = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    match state.backend().login(&request).await {
        Ok(token) => {
            store_tokens(&session, &token).await?;
            info!("Signed in");
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            warn!(error = %e, "Sign-in refused");
            let page = LoginTemplate {
                message: None,
                error: Some(e.to_string()),
                success: None,
                email: request.email,
            };
            Ok((refusal_status(&e), page).into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate::blank(query.error)
}

/// Handle registration form submission.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            let page = RegisterTemplate::refill(form, format!("Email không hợp lệ: {e}"));
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    let role = form.role.as_deref().unwrap_or("customer");
    if !REGISTER_ROLES.iter().any(|(value, _)| *value == role) {
        let page = RegisterTemplate::refill(form, "Vai trò không hợp lệ".to_string());
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    let request = RegisterRequest {
        username: form.username.trim().to_string(),
        email: email.into(),
        phone: form.phone.trim().to_string(),
        full_name: form.full_name.trim().to_string(),
        password: form.password.clone(),
        role: role.to_string(),
    };

    match state.backend().register(&request).await {
        Ok(_) => {
            info!(role = %request.role, "Account registered");
            Redirect::to("/auth/login?success=registered").into_response()
        }
        Err(e) => {
            warn!(error = %e, "Registration refused");
            let status = refusal_status(&e);
            (status, RegisterTemplate::refill(form, e.to_string())).into_response()
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Revoking the token at the backend is best effort; the session is cleared
/// regardless.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect, AppError> {
    if let Some(token) = bearer_token(&session).await
        && let Err(e) = state.backend().logout(&token).await
    {
        warn!(error = %e, "Backend logout failed");
    }

    clear_tokens(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}
