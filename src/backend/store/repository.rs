//! Typed access to one collection.
//!
//! `Repository<M>` serializes models to documents and back, and runs
//! read-modify-write updates against the version counter, retrying a
//! bounded number of times when a concurrent write wins.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::backend::store::error::{StorageError, StorageResult};
use crate::backend::store::traits::{Collection, Document, DocumentStore};
use crate::shared::models::{Post, Profile, User};

/// Attempts made by [`Repository::update`] before giving up with a conflict.
pub const MAX_UPDATE_ATTEMPTS: usize = 5;

/// A model stored as a document in one collection.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> Uuid;
}

impl Model for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Model for Profile {
    const COLLECTION: Collection = Collection::Profiles;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Model for Post {
    const COLLECTION: Collection = Collection::Posts;

    fn id(&self) -> Uuid {
        self.id
    }
}

pub struct Repository<M> {
    store: Arc<dyn DocumentStore>,
    _model: PhantomData<fn() -> M>,
}

impl<M> Clone for Repository<M> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _model: PhantomData,
        }
    }
}

impl<M: Model> Repository<M> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _model: PhantomData,
        }
    }

    fn decode(document: Document) -> StorageResult<M> {
        Ok(serde_json::from_value(document.body)?)
    }

    /// Insert a new model. Fails with `DuplicateKey` on a unique field clash.
    pub async fn create(&self, model: M) -> StorageResult<M> {
        let body = serde_json::to_value(&model)?;
        self.store.insert(M::COLLECTION, model.id(), body).await?;
        Ok(model)
    }

    pub async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<M>> {
        self.store
            .get(M::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// First model whose top-level string `field` equals `value`.
    pub async fn find_one_by(&self, field: &str, value: &str) -> StorageResult<Option<M>> {
        self.store
            .find_one(M::COLLECTION, field, value)
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// All models in insertion order.
    pub async fn list(&self) -> StorageResult<Vec<M>> {
        self.store
            .find_all(M::COLLECTION)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        self.store.delete(M::COLLECTION, id).await
    }

    /// Read-modify-write a single model.
    ///
    /// `mutate` runs against a freshly read copy on every attempt and may
    /// reject the change by returning an error, which is passed through
    /// untouched. Returns `Ok(None)` if the model does not exist (or was
    /// deleted mid-update). After [`MAX_UPDATE_ATTEMPTS`] lost races the
    /// last `VersionConflict` is returned.
    pub async fn update<E, F>(&self, id: Uuid, mut mutate: F) -> Result<Option<M>, E>
    where
        E: From<StorageError> + Send,
        F: FnMut(&mut M) -> Result<(), E> + Send,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let Some(document) = self.store.get(M::COLLECTION, id).await? else {
                return Ok(None);
            };
            let version = document.version;
            let mut model = Self::decode(document)?;
            mutate(&mut model)?;

            let body = serde_json::to_value(&model).map_err(StorageError::from)?;
            match self.store.replace(M::COLLECTION, id, version, body).await {
                Ok(_) => return Ok(Some(model)),
                Err(StorageError::NotFound { .. }) => return Ok(None),
                Err(err @ StorageError::VersionConflict { .. }) => {
                    if attempt >= MAX_UPDATE_ATTEMPTS {
                        tracing::warn!(
                            collection = %M::COLLECTION,
                            %id,
                            attempts = attempt,
                            "Giving up after repeated version conflicts"
                        );
                        return Err(err.into());
                    }
                    tracing::debug!(collection = %M::COLLECTION, %id, attempt, "Version conflict, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
