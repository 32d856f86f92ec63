//! Request ID middleware for log and error correlation.
//!
//! Keeps an upstream `x-request-id` when one is supplied, otherwise assigns a
//! UUID v4. The ID is written back onto the request so the trace span built
//! further in can read it, tagged on the Sentry scope, and echoed in the
//! response.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Read the request ID from a header map, if present and printable.
#[must_use]
pub fn request_id(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers.get(REQUEST_ID_HEADER).and_then(|h| h.to_str().ok())
}

/// Middleware that ensures every request carries a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let existing = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty() && v.to_str().is_ok())
        .cloned();

    let value = if let Some(value) = existing {
        value
    } else {
        // UUIDs are always valid header values
        let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER, generated.clone());
        generated
    };

    if let Ok(id) = value.to_str() {
        sentry::configure_scope(|scope| scope.set_tag("request_id", id));
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, value);
    response
}
