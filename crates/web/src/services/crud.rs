//! Collection CRUD.
//!
//! [`CrudService`] is a stand-in store: it never persists and never touches
//! the network. Reads come back empty, writes echo the item. Callers code
//! against [`CollectionStore`] so a real backend can replace it.

use std::future::Future;

use thiserror::Error;
use tracing::{debug, error, instrument};

use deliveryhub_core::{CollectionItem, DeletedItem, QueryResult};

/// Errors returned by collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrudError {
    /// The operation needs an identifier and none was given.
    #[error("{collection} ID is required for {action}")]
    MissingId {
        collection: String,
        action: &'static str,
    },
}

impl CrudError {
    fn missing_id(collection: &str, action: &'static str) -> Self {
        let err = Self::MissingId {
            collection: collection.to_string(),
            action,
        };
        error!(collection, error = %err, "Collection operation rejected");
        err
    }
}

/// Storage for generic collection records.
pub trait CollectionStore: Send + Sync {
    /// Insert `item`, returning it with an identifier assigned.
    fn create(
        &self,
        collection: &str,
        item: CollectionItem,
    ) -> impl Future<Output = Result<CollectionItem, CrudError>> + Send;

    /// List every record in `collection`.
    fn get_all(&self, collection: &str)
    -> impl Future<Output = Result<QueryResult, CrudError>> + Send;

    /// Fetch one record by identifier.
    fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<CollectionItem>, CrudError>> + Send;

    /// Replace a record. The item must carry its identifier.
    fn update(
        &self,
        collection: &str,
        item: CollectionItem,
    ) -> impl Future<Output = Result<CollectionItem, CrudError>> + Send;

    /// Remove a record by identifier.
    fn delete(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<DeletedItem, CrudError>> + Send;
}

/// Non-persistent collection store.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrudService;

impl CrudService {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CollectionStore for CrudService {
    #[instrument(skip(self, item))]
    async fn create(
        &self,
        collection: &str,
        mut item: CollectionItem,
    ) -> Result<CollectionItem, CrudError> {
        let id = chrono::Utc::now().timestamp_millis().to_string();
        debug!(id = %id, "Assigned identifier to new item");
        item.id = Some(id);
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_all(&self, collection: &str) -> Result<QueryResult, CrudError> {
        Ok(QueryResult::default())
    }

    #[instrument(skip(self))]
    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<CollectionItem>, CrudError> {
        Ok(None)
    }

    #[instrument(skip(self, item))]
    async fn update(
        &self,
        collection: &str,
        item: CollectionItem,
    ) -> Result<CollectionItem, CrudError> {
        if item.identifier().is_none() {
            return Err(CrudError::missing_id(collection, "update"));
        }
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> Result<DeletedItem, CrudError> {
        if id.is_empty() {
            return Err(CrudError::missing_id(collection, "deletion"));
        }
        Ok(DeletedItem { id: id.to_string() })
    }
}
