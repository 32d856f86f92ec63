//! Backend-related errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the delivery backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request could not be sent or the connection failed.
    ///
    /// The detail names backend URLs; it is logged, never displayed.
    #[error("Network error")]
    Request(String),

    /// Failed to parse response body. The detail is logged, never displayed.
    #[error("Unexpected response from server")]
    Response(String),

    /// Backend answered with a non-success status or `ok: false`.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        /// User-facing message.
        message: String,
    },
}

impl BackendError {
    /// Build a rejection with a fixed user-facing message.
    pub(crate) fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Status code returned by the backend, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Request(_) | Self::Response(_) => None,
        }
    }
}
