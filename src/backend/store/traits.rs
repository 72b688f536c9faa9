//! DocumentStore trait definition.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::backend::store::error::StorageResult;

/// The document collections kept by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Profiles,
    Posts,
}

impl Collection {
    /// Name used as the collection key in storage.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Profiles => "profiles",
            Collection::Posts => "posts",
        }
    }

    /// Top-level string fields whose values must be unique in the collection.
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Users => &["email"],
            Collection::Profiles => &["user"],
            Collection::Posts => &[],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored document with its version counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    /// Starts at 1 and increases by one on every successful replace.
    pub version: i64,
    pub body: Value,
}

/// Abstract document storage.
///
/// Implementations must be thread-safe (Send + Sync), enforce the unique
/// fields declared by [`Collection::unique_fields`], and apply `replace`
/// only when the stored version equals the expected one.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Inserts a new document at version 1.
    async fn insert(&self, collection: Collection, id: Uuid, body: Value)
        -> StorageResult<Document>;

    /// Gets a document by id.
    async fn get(&self, collection: Collection, id: Uuid) -> StorageResult<Option<Document>>;

    /// Finds the first document whose top-level string `field` equals `value`.
    async fn find_one(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StorageResult<Option<Document>>;

    /// Lists all documents of a collection in insertion order.
    async fn find_all(&self, collection: Collection) -> StorageResult<Vec<Document>>;

    /// Replaces a document if its version is still `expected_version`.
    ///
    /// Fails with `VersionConflict` when another write got there first and
    /// with `NotFound` when the document is gone.
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        expected_version: i64,
        body: Value,
    ) -> StorageResult<Document>;

    /// Deletes a document. Returns whether it existed.
    async fn delete(&self, collection: Collection, id: Uuid) -> StorageResult<bool>;
}

/// Values of the unique fields present in `body`.
pub(crate) fn unique_values(collection: Collection, body: &Value) -> Vec<(&'static str, String)> {
    collection
        .unique_fields()
        .iter()
        .filter_map(|field| {
            body.get(*field)
                .and_then(Value::as_str)
                .map(|value| (*field, value.to_string()))
        })
        .collect()
}
