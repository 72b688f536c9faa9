//! In-memory document store.
//!
//! Used by the test-suite and when no `DATABASE_URL` is configured.
//! Documents live in a `DashMap` keyed by `(collection, id)`; unique field
//! values are claimed in a second `DashMap` through its entry API so that
//! two concurrent inserts cannot both succeed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::backend::store::error::{StorageError, StorageResult};
use crate::backend::store::traits::{unique_values, Collection, Document, DocumentStore};

type UniqueKey = (Collection, &'static str, String);

#[derive(Debug)]
struct StoredEntry {
    seq: u64,
    version: i64,
    body: Value,
}

impl StoredEntry {
    fn to_document(&self, id: Uuid) -> Document {
        Document {
            id,
            version: self.version,
            body: self.body.clone(),
        }
    }
}

/// In-memory implementation of DocumentStore.
///
/// Lock order: a `documents` shard may be held while claiming in `unique`,
/// never the other way round.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<(Collection, Uuid), StoredEntry>,
    unique: DashMap<UniqueKey, Uuid>,
    seq: AtomicU64,
}

impl MemoryDocumentStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory store wrapped in Arc.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Claims each key for `id`, all or nothing. Returns the keys newly claimed.
    fn claim(
        &self,
        collection: Collection,
        id: Uuid,
        keys: &[(&'static str, String)],
    ) -> StorageResult<Vec<UniqueKey>> {
        let mut claimed: Vec<UniqueKey> = Vec::with_capacity(keys.len());
        for (field, value) in keys {
            let key = (collection, *field, value.clone());
            let taken = match self.unique.entry(key.clone()) {
                Entry::Occupied(existing) => *existing.get() != id,
                Entry::Vacant(slot) => {
                    slot.insert(id);
                    claimed.push(key);
                    false
                }
            };
            if taken {
                self.release(&claimed);
                return Err(StorageError::DuplicateKey { collection, field });
            }
        }
        Ok(claimed)
    }

    fn release(&self, keys: &[UniqueKey]) {
        for key in keys {
            self.unique.remove(key);
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    #[instrument(skip(self, body), fields(collection = %collection))]
    async fn insert(&self, collection: Collection, id: Uuid, body: Value) -> StorageResult<Document> {
        let claimed = self.claim(collection, id, &unique_values(collection, &body))?;

        match self.documents.entry((collection, id)) {
            Entry::Occupied(_) => {
                self.release(&claimed);
                Err(StorageError::DuplicateKey {
                    collection,
                    field: "_id",
                })
            }
            Entry::Vacant(slot) => {
                let entry = slot.insert(StoredEntry {
                    seq: self.seq.fetch_add(1, Ordering::Relaxed),
                    version: 1,
                    body,
                });
                Ok(entry.to_document(id))
            }
        }
    }

    async fn get(&self, collection: Collection, id: Uuid) -> StorageResult<Option<Document>> {
        Ok(self
            .documents
            .get(&(collection, id))
            .map(|entry| entry.to_document(id)))
    }

    async fn find_one(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StorageResult<Option<Document>> {
        if let Some(unique_field) = collection.unique_fields().iter().find(|f| **f == field) {
            let id = self
                .unique
                .get(&(collection, *unique_field, value.to_string()))
                .map(|owner| *owner);
            return match id {
                Some(id) => self.get(collection, id).await,
                None => Ok(None),
            };
        }

        let mut matches: Vec<(u64, Document)> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .filter(|entry| entry.value().body.get(field).and_then(Value::as_str) == Some(value))
            .map(|entry| (entry.value().seq, entry.value().to_document(entry.key().1)))
            .collect();
        matches.sort_by_key(|(seq, _)| *seq);
        Ok(matches.into_iter().next().map(|(_, doc)| doc))
    }

    async fn find_all(&self, collection: Collection) -> StorageResult<Vec<Document>> {
        let mut documents: Vec<(u64, Document)> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .map(|entry| (entry.value().seq, entry.value().to_document(entry.key().1)))
            .collect();
        documents.sort_by_key(|(seq, _)| *seq);
        Ok(documents.into_iter().map(|(_, doc)| doc).collect())
    }

    #[instrument(skip(self, body), fields(collection = %collection))]
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        expected_version: i64,
        body: Value,
    ) -> StorageResult<Document> {
        let mut entry = self
            .documents
            .get_mut(&(collection, id))
            .ok_or(StorageError::NotFound { collection, id })?;

        if entry.version != expected_version {
            return Err(StorageError::VersionConflict {
                collection,
                id,
                expected: expected_version,
            });
        }

        let old_keys = unique_values(collection, &entry.body);
        let new_keys = unique_values(collection, &body);
        let added: Vec<_> = new_keys
            .iter()
            .filter(|key| !old_keys.contains(key))
            .cloned()
            .collect();
        self.claim(collection, id, &added)?;
        let dropped: Vec<UniqueKey> = old_keys
            .into_iter()
            .filter(|key| !new_keys.contains(key))
            .map(|(field, value)| (collection, field, value))
            .collect();
        self.release(&dropped);

        entry.version += 1;
        entry.body = body;
        Ok(entry.to_document(id))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> StorageResult<bool> {
        let Some((_, entry)) = self.documents.remove(&(collection, id)) else {
            return Ok(false);
        };
        let keys: Vec<UniqueKey> = unique_values(collection, &entry.body)
            .into_iter()
            .map(|(field, value)| (collection, field, value))
            .collect();
        self.release(&keys);
        Ok(true)
    }
}
