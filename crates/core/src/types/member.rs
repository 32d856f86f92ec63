//! Authenticated member identity.

use serde::{Deserialize, Serialize};

use super::email::Email;

/// The authenticated member shown in dashboards.
///
/// There is no member store behind this yet; the members service
/// synthesizes a placeholder whenever a sign-in token is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub email: Email,
    pub name: String,
}

impl Member {
    /// The stand-in member returned for any signed-in session.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: "1".to_string(),
            email: Email::from_static("user@example.com"),
            name: "User".to_string(),
        }
    }
}
