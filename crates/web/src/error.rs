//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! and renders the error page. Route handlers return `Result<T, AppError>`.

use std::any::Any;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::BackendError;
use crate::filters;
use crate::services::CrudError;

/// Application-level error type for the web client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Delivery backend call failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Collection operation was rejected.
    #[error("Collection error: {0}")]
    Crud(#[from] CrudError),

    /// Session store read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Backend(BackendError::Rejected { status, .. }) if status.is_client_error() => {
                *status
            }
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::Crud(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the visitor. Never includes internal details.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Backend(BackendError::Rejected { message, .. }) => message.clone(),
            Self::Backend(_) => "External service error".to_string(),
            Self::Crud(err) => err.to_string(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::BadRequest(why) => why.clone(),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// Generic error page.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    /// Canonical status text, e.g. "Not Found".
    pub title: String,
    pub message: String,
}

impl ErrorTemplate {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
        }
    }

    /// Render with `status` as the response status.
    #[must_use]
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, self).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::warn!(error = %self, status = %status, "Request rejected");
        }

        ErrorTemplate::new(status, self.public_message()).into_response_with(status)
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Render the error page for a handler panic.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    let event_id = sentry::capture_message(detail, sentry::Level::Fatal);
    tracing::error!(panic = detail, sentry_event_id = %event_id, "Handler panicked");

    ErrorTemplate::new(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Associate subsequent Sentry events with a signed-in member.
pub fn set_sentry_user(member_id: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(member_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context (sign-out).
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for an operator action.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("approvals", "Approved registration", Some(&[("user_role_id", "12")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data.unwrap_or_default() {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::NotFound("x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("x".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Backend(BackendError::Request("refused".to_string())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Backend(BackendError::rejected(StatusCode::FORBIDDEN, "Failed to load"))
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Backend(BackendError::rejected(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load"
            ))
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Internal("db password wrong".to_string());
        assert_eq!(err.public_message(), "Internal server error");

        let err = AppError::Backend(BackendError::Response("missing field".to_string()));
        assert_eq!(err.public_message(), "External service error");
    }

    #[tokio::test]
    async fn test_error_page_has_home_link() {
        let response = AppError::NotFound("order 9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body_text(response).await;
        assert!(html.contains("Not Found"));
        assert!(html.contains("order 9"));
        assert!(html.contains(r#"href="/""#));
    }

    #[tokio::test]
    async fn test_panic_renders_error_page() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let html = body_text(response).await;
        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("boom"));
    }
}
