//! Document store contract tests
//!
//! The same checks run against every `DocumentStore`. The PostgreSQL run
//! is opt-in: `DATABASE_URL=... cargo test -- --ignored`.

use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;

use devconnect::backend::store::{
    Collection, DocumentStore, MemoryDocumentStore, PostgresDocumentStore, StorageError,
};

async fn check_store_contract(store: Arc<dyn DocumentStore>) {
    let email = format!("{}@example.com", Uuid::new_v4());
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let doc = store
        .insert(Collection::Users, first, json!({ "email": email, "name": "A" }))
        .await
        .unwrap();
    assert_eq!(doc.version, 1);

    let duplicate = store
        .insert(Collection::Users, second, json!({ "email": email, "name": "B" }))
        .await;
    assert_matches!(duplicate, Err(StorageError::DuplicateKey { .. }));

    let found = store
        .find_one(Collection::Users, "email", &email)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, first);

    let updated = store
        .replace(Collection::Users, first, 1, json!({ "email": email, "name": "A2" }))
        .await
        .unwrap();
    assert_eq!(updated.version, 2);

    let stale = store
        .replace(Collection::Users, first, 1, json!({ "email": email, "name": "A3" }))
        .await;
    assert_matches!(stale, Err(StorageError::VersionConflict { .. }));

    assert!(store.delete(Collection::Users, first).await.unwrap());
    assert!(!store.delete(Collection::Users, first).await.unwrap());
    assert!(store.get(Collection::Users, first).await.unwrap().is_none());

    let missing = store
        .replace(Collection::Users, first, 2, json!({ "email": email }))
        .await;
    assert_matches!(missing, Err(StorageError::NotFound { .. }));

    // The email is free again once its owner is gone
    store
        .insert(Collection::Users, second, json!({ "email": email, "name": "B" }))
        .await
        .unwrap();
    store.delete(Collection::Users, second).await.unwrap();
}

#[tokio::test]
async fn test_memory_store_contract() {
    check_store_contract(MemoryDocumentStore::new_shared()).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL instance"]
async fn test_postgres_store_contract() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let store = PostgresDocumentStore::connect(&url).await.unwrap();
    check_store_contract(Arc::new(store)).await;
}
