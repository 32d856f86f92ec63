//! Generic collection records.
//!
//! Collection items are open-ended key/value records with an optional
//! identifier. They carry no domain meaning of their own; the collection
//! they belong to decides what the fields mean.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record in a named collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    /// Identifier assigned on creation. Required for update and delete.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Every other field of the record.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CollectionItem {
    /// Create an item without an identifier.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { id: None, fields }
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The identifier, if present and non-empty.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Result of listing a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub items: Vec<CollectionItem>,
    pub total_count: usize,
}

/// Acknowledgement of a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedItem {
    #[serde(rename = "_id")]
    pub id: String,
}
