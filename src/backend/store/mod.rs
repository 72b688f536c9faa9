//! Document Store Module
//!
//! Persistence for users, profiles and posts. Every model is stored as a
//! JSON document with a version counter behind the [`DocumentStore`] trait,
//! which has two implementations:
//!
//! - **`memory`** - `DashMap`-backed store used for tests and when no
//!   `DATABASE_URL` is configured
//! - **`postgres`** - JSONB rows in PostgreSQL via sqlx
//!
//! Handlers never touch the trait directly. They go through the typed
//! [`Repository`] handles collected in [`Database`].

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod traits;

use std::sync::Arc;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use repository::{Model, Repository, MAX_UPDATE_ATTEMPTS};
pub use traits::{Collection, Document, DocumentStore};

use crate::shared::models::{Post, Profile, User};

/// Typed repositories over one shared document store
#[derive(Clone)]
pub struct Database {
    pub users: Repository<User>,
    pub profiles: Repository<Profile>,
    pub posts: Repository<Post>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Repository::new(Arc::clone(&store)),
            profiles: Repository::new(Arc::clone(&store)),
            posts: Repository::new(store),
        }
    }

    /// Database backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(MemoryDocumentStore::new_shared())
    }
}
