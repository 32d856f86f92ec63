//! HTTP route handlers for the web client.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//! GET  /static/app.css         - Stylesheet
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Dashboards (require a signed-in member)
//! GET  /dashboard/customer     - Customer dashboard
//! GET  /dashboard/courier      - Courier dashboard
//! GET  /dashboard/merchant     - Merchant dashboard
//! GET  /dashboard/admin        - Admin dashboard with role approvals
//! POST /dashboard/admin/role-registrations/{id}/approve
//! POST /dashboard/admin/role-registrations/{id}/reject
//!
//! *                            - 303 to /
//! ```

pub mod approvals;
pub mod auth;
pub mod dashboard;
pub mod home;

use axum::{
    Router,
    extract::Request,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    middleware,
    response::{IntoResponse, Redirect},
    routing::{MethodRouter, get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use deliveryhub_core::DashboardRole;

use crate::error::handle_panic;
use crate::middleware::{
    MemberGuard, create_session_layer, request_id::request_id, request_id_middleware,
    require_member, security_headers_middleware,
};
use crate::state::AppState;

/// Stylesheet shared by every page.
const STYLESHEET: &str = include_str!("../../static/app.css");

/// Wrap a route in the member guard for `role`'s dashboard.
fn guarded(
    state: &AppState,
    role: DashboardRole,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(
        MemberGuard::new(role, state),
        require_member,
    ))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the dashboard routes router.
pub fn dashboard_routes(state: &AppState) -> Router<AppState> {
    use DashboardRole::{Admin, Courier, Customer, Merchant};

    Router::new()
        .route("/customer", guarded(state, Customer, get(dashboard::customer)))
        .route("/courier", guarded(state, Courier, get(dashboard::courier)))
        .route("/merchant", guarded(state, Merchant, get(dashboard::merchant)))
        .route("/admin", guarded(state, Admin, get(approvals::admin)))
        .route(
            "/admin/role-registrations/{id}/approve",
            guarded(state, Admin, post(approvals::approve)),
        )
        .route(
            "/admin/role-registrations/{id}/reject",
            guarded(state, Admin, post(approvals::reject)),
        )
}

/// Create all page routes.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/auth", auth_routes())
        .nest("/dashboard", dashboard_routes(state))
}

/// Build the complete application with its middleware stack.
pub fn app(state: AppState) -> Router {
    let pages = Router::new()
        .route("/health", get(health))
        .route("/static/app.css", get(stylesheet))
        .merge(routes(&state))
        .fallback(fallback);

    with_middleware(pages, state)
}

/// Apply the middleware stack to `router` and bind its state.
fn with_middleware(router: Router<AppState>, state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    router
        .layer(session_layer)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = request_id(request.headers()).unwrap_or("-"),
            )
        }))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn stylesheet() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/css; charset=utf-8"),
            (CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}

/// Unknown paths go home rather than to an error page.
async fn fallback() -> Redirect {
    Redirect::to("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{
            HeaderMap, Request, StatusCode,
            header::{COOKIE, LOCATION, SET_COOKIE},
        },
        response::Response,
    };
    use tower::ServiceExt;
    use url::Url;

    use deliveryhub_core::RegistrationType;

    use super::*;
    use crate::config::WebConfig;
    use crate::test_support::FakeBackend;

    fn test_state(api_base: Url) -> AppState {
        AppState::new(WebConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            api_base,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        })
    }

    fn test_app(api_base: Url) -> Router {
        app(test_state(api_base))
    }

    fn offline_app() -> Router {
        // Routes under test here never reach the backend
        test_app(Url::parse("http://127.0.0.1:9").unwrap())
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, cookie: Option<&str>, fields: &[(&str, &str)]) -> Request<Body> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn location(headers: &HeaderMap) -> &str {
        headers[LOCATION].to_str().unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Sign in as the fake backend's admin and return the session cookie.
    async fn sign_in(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(form_request(
                "/auth/login",
                None,
                &[
                    ("email", FakeBackend::ADMIN_EMAIL),
                    ("password", FakeBackend::ADMIN_PASSWORD),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(response.headers()), "/");

        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let response = offline_app()
            .oneshot(get_request("/health", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    async fn exploding_page() -> &'static str {
        panic!("template exploded")
    }

    #[tokio::test]
    async fn test_handler_panic_renders_error_page() {
        let state = test_state(Url::parse("http://127.0.0.1:9").unwrap());
        let app = with_middleware(Router::new().route("/explode", get(exploding_page)), state);

        let response = app.oneshot(get_request("/explode", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key("x-request-id"));
        let html = body_text(response).await;
        assert!(html.contains("Something went wrong"));
        assert!(html.contains(r#"href="/""#));
        assert!(!html.contains("template exploded"));
    }

    #[tokio::test]
    async fn test_unknown_path_redirects_home() {
        let response = offline_app()
            .oneshot(get_request("/nonexistent", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(response.headers()), "/");
    }

    #[tokio::test]
    async fn test_dashboards_redirect_without_token() {
        let app = offline_app();

        for role in DashboardRole::ALL {
            let response = app
                .clone()
                .oneshot(get_request(&role.path(), None))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{role}");
            assert_eq!(
                location(response.headers()),
                crate::middleware::sign_in_url(role)
            );
        }
    }

    #[tokio::test]
    async fn test_guarded_post_redirects_without_token() {
        let response = offline_app()
            .oneshot(form_request(
                "/dashboard/admin/role-registrations/1/approve",
                None,
                &[("confirm", "yes")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(response.headers()).starts_with("/auth/login?message="));
    }

    #[tokio::test]
    async fn test_home_renders_sections() {
        let response = offline_app().oneshot(get_request("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        for anchor in ["benefits", "how-it-works", "pricing", "tracking", "drivers", "merchants", "faq"] {
            assert!(html.contains(&format!(r#"id="{anchor}""#)), "missing section {anchor}");
        }
        assert!(html.contains("15.000đ"));
        assert!(html.contains(r#"href="/auth/login""#));
    }

    #[tokio::test]
    async fn test_sign_in_page_shows_guard_prompt() {
        let url = crate::middleware::sign_in_url(DashboardRole::Merchant);
        let response = offline_app().oneshot(get_request(&url, None)).await.unwrap();

        let html = body_text(response).await;
        assert!(html.contains(DashboardRole::Merchant.sign_in_prompt()));
    }

    #[tokio::test]
    async fn test_security_headers_and_request_id() {
        let response = offline_app().oneshot(get_request("/", None)).await.unwrap();
        let headers = response.headers();

        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert!(headers.contains_key("content-security-policy"));
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_stylesheet_is_cacheable() {
        let response = offline_app()
            .oneshot(get_request("/static/app.css", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], "public, max-age=3600");
    }

    #[tokio::test]
    async fn test_login_failure_rerenders_form() {
        let backend = FakeBackend::spawn().await;
        let response = test_app(backend.url())
            .oneshot(form_request(
                "/auth/login",
                None,
                &[("email", FakeBackend::ADMIN_EMAIL), ("password", "nope")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!response.headers().contains_key(SET_COOKIE));
        assert!(body_text(response).await.contains("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_register_redirects_to_sign_in() {
        let backend = FakeBackend::spawn().await;
        let response = test_app(backend.url())
            .oneshot(form_request(
                "/auth/register",
                None,
                &[
                    ("username", "lan"),
                    ("email", "lan@example.com"),
                    ("phone", "0901234567"),
                    ("full_name", "Tran Lan"),
                    ("password", "hunter22"),
                    ("role", "shipper"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(response.headers()),
            "/auth/login?success=registered"
        );
        assert_eq!(backend.calls(), ["POST /auth/register email=lan@example.com"]);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email_locally() {
        let backend = FakeBackend::spawn().await;
        let response = test_app(backend.url())
            .oneshot(form_request(
                "/auth/register",
                None,
                &[
                    ("username", "lan"),
                    ("email", "not-an-email"),
                    ("password", "hunter22"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_signed_in_member_sees_dashboards() {
        let backend = FakeBackend::spawn().await;
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        for role in [DashboardRole::Customer, DashboardRole::Courier, DashboardRole::Merchant] {
            let response = app
                .clone()
                .oneshot(get_request(&role.path(), Some(&cookie)))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{role}");
            let html = body_text(response).await;
            assert!(html.contains(role.title()));
            assert!(html.contains("user@example.com"));
        }
    }

    #[tokio::test]
    async fn test_admin_approval_end_to_end() {
        let backend = FakeBackend::spawn().await;
        backend.set_pending(vec![FakeBackend::merchant(1)], vec![]);
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        let response = app
            .clone()
            .oneshot(get_request("/dashboard/admin", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Role Approvals (1 pending)"));
        assert!(html.contains("Shop 1"));
        assert!(html.contains(r#"data-tab="merchant" aria-selected="true""#));

        let response = app
            .clone()
            .oneshot(form_request(
                "/dashboard/admin/role-registrations/1/approve",
                Some(&cookie),
                &[("confirm", "yes"), ("tab", "merchant")],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Registration approved"));
        assert!(html.contains("No pending role approvals"));

        assert_eq!(
            backend.count_calls("PUT /admin/role-registrations/1/approve"),
            1
        );
        // One load for the page, one refresh after the approval
        assert_eq!(
            backend.count_calls("GET /admin/role-registrations/pending"),
            2
        );
        assert_eq!(
            backend.last_authorization(),
            Some(format!("Bearer {}", FakeBackend::TOKEN))
        );
    }

    #[tokio::test]
    async fn test_unconfirmed_approval_sends_nothing() {
        let backend = FakeBackend::spawn().await;
        backend.set_pending(vec![], vec![FakeBackend::shipper(2)]);
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        let response = app
            .oneshot(form_request(
                "/dashboard/admin/role-registrations/2/approve",
                Some(&cookie),
                &[("tab", "shipper")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(response.headers()), "/dashboard/admin?tab=shipper");
        assert_eq!(backend.count_calls("PUT"), 0);
        assert_eq!(backend.count_calls("GET"), 0);
    }

    #[tokio::test]
    async fn test_blank_reject_reason_sends_nothing() {
        let backend = FakeBackend::spawn().await;
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        let response = app
            .oneshot(form_request(
                "/dashboard/admin/role-registrations/3/reject",
                Some(&cookie),
                &[("reason", "  ")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(backend.count_calls("PUT"), 0);
    }

    #[tokio::test]
    async fn test_rejection_sends_reason() {
        let backend = FakeBackend::spawn().await;
        backend.set_pending(vec![], vec![FakeBackend::shipper(3)]);
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        let response = app
            .oneshot(form_request(
                "/dashboard/admin/role-registrations/3/reject",
                Some(&cookie),
                &[("reason", "Blurry ID card"), ("tab", "shipper")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Registration rejected"));
        assert!(html.contains("No pending role approvals"));
        assert_eq!(
            backend.count_calls("PUT /admin/role-registrations/3/reject reason=Blurry ID card"),
            1
        );
    }

    #[tokio::test]
    async fn test_failed_approval_redirects_with_alert() {
        let backend = FakeBackend::spawn().await;
        backend.set_pending(vec![FakeBackend::merchant(4)], vec![]);
        backend.fail_mutations_with(StatusCode::INTERNAL_SERVER_ERROR);
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        let response = app
            .clone()
            .oneshot(form_request(
                "/dashboard/admin/role-registrations/4/approve",
                Some(&cookie),
                &[("confirm", "yes")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let to = location(response.headers()).to_string();
        assert_eq!(to, "/dashboard/admin?tab=merchant&error=Failed%20to%20approve");
        assert_eq!(backend.count_calls("GET"), 0);

        // Following the redirect shows the alert over the unchanged list
        let html = body_text(
            app.oneshot(get_request(&to, Some(&cookie))).await.unwrap(),
        )
        .await;
        assert!(html.contains("Failed to approve"));
        assert!(html.contains("Role Approvals (1 pending)"));
    }

    #[tokio::test]
    async fn test_failed_load_shows_empty_panel_with_alert() {
        let backend = FakeBackend::spawn().await;
        backend.fail_with(StatusCode::FORBIDDEN);
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        let response = app
            .oneshot(get_request("/dashboard/admin?tab=shipper", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("No pending role approvals"));
        assert!(html.contains("Failed to load"));
    }

    #[tokio::test]
    async fn test_shipper_tab_lists_shippers() {
        let backend = FakeBackend::spawn().await;
        backend.set_pending(vec![FakeBackend::merchant(5)], vec![FakeBackend::shipper(6)]);
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        let uri = format!(
            "/dashboard/admin?tab={}",
            RegistrationType::Shipper.as_str()
        );
        let html = body_text(app.oneshot(get_request(&uri, Some(&cookie))).await.unwrap()).await;

        assert!(html.contains("Role Approvals (2 pending)"));
        assert!(html.contains("59-X1 006"));
        assert!(!html.contains("Shop 5"));
    }

    #[tokio::test]
    async fn test_logout_signs_out() {
        let backend = FakeBackend::spawn().await;
        let app = test_app(backend.url());
        let cookie = sign_in(&app).await;

        let response = app
            .clone()
            .oneshot(form_request("/auth/logout", Some(&cookie), &[]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(response.headers()), "/");
        assert_eq!(backend.count_calls("POST /auth/logout"), 1);
        assert_eq!(
            backend.last_authorization(),
            Some(format!("Bearer {}", FakeBackend::TOKEN))
        );

        let response = app
            .oneshot(get_request("/dashboard/customer", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
