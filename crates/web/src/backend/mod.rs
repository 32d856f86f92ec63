//! Delivery backend REST integration.
//!
//! This module provides:
//! - [`BackendClient`] for the auth and role-registration endpoints
//! - Request/response types matching the backend's JSON
//!
//! Every call is a single attempt. Failures surface as [`BackendError`],
//! whose display text is what the user sees.

mod client;
mod error;
mod types;

pub use client::BackendClient;
pub use error::BackendError;
pub use types::{AuthResponse, BackendUser, LoginRequest, RegisterRequest, RejectRequest};
