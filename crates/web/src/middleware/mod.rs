//! HTTP middleware stack for the web client.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. Request ID (ensure `x-request-id` before anything logs)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Panic catcher (render the error page instead of dropping the connection)
//! 5. Security headers
//! 6. Session layer (tower-sessions with in-memory store)
//! 7. Member guard (dashboard routes only)

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    CurrentMember, GuardDecision, MemberGuard, clear_tokens, decide, require_member, sign_in_url,
    store_tokens,
};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
