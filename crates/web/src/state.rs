//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::WebConfig;
use crate::services::{CrudService, MemberService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds no per-visitor data; that lives in
/// the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    backend: BackendClient,
    members: MemberService,
    crud: CrudService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: WebConfig) -> Self {
        let backend = BackendClient::new(&config.api_base);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                members: MemberService::new(),
                crud: CrudService::new(),
            }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the delivery backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the member lookup.
    #[must_use]
    pub fn members(&self) -> &MemberService {
        &self.inner.members
    }

    /// Get a reference to the collection store.
    #[must_use]
    pub fn crud(&self) -> &CrudService {
        &self.inner.crud
    }
}
