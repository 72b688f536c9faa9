/**
 * PostgreSQL Document Store
 *
 * Documents are kept as JSONB rows in a single `documents` table keyed by
 * `(collection, id)`. Unique fields are enforced by partial unique indexes
 * (see `migrations/`), and `replace` is a version-checked UPDATE.
 */

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::store::error::{StorageError, StorageResult};
use crate::backend::store::traits::{Collection, Document, DocumentStore};

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    version: i64,
    body: Json<Value>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            version: row.version,
            body: row.body.0,
        }
    }
}

/// PostgreSQL implementation of DocumentStore.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Connect to the database and run pending migrations.
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                message: e.to_string(),
            })?;
        tracing::info!("Database connection pool created successfully");

        tracing::info!("Running database migrations...");
        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| StorageError::ConnectionError {
                message: format!("migration failed: {}", e),
            })?;
        tracing::info!("Database migrations completed successfully");

        Ok(Self { pool })
    }

    /// Wrap an existing pool. Migrations are assumed to have run.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error for `collection` into a StorageError.
fn map_sqlx_error(collection: Collection, err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = if db_err.constraint() == Some("documents_pkey") {
                "_id"
            } else {
                collection.unique_fields().first().copied().unwrap_or("_id")
            };
            return StorageError::DuplicateKey { collection, field };
        }
    }
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StorageError::ConnectionError {
                message: err.to_string(),
            }
        }
        other => StorageError::QueryError {
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn insert(&self, collection: Collection, id: Uuid, body: Value) -> StorageResult<Document> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            RETURNING id, version, body
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(body))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(row.into())
    }

    async fn get(&self, collection: Collection, id: Uuid) -> StorageResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, version, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(row.map(Document::from))
    }

    async fn find_one(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StorageResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, version, body FROM documents
            WHERE collection = $1 AND body->>$2 = $3
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(collection.name())
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(row.map(Document::from))
    }

    async fn find_all(&self, collection: Collection) -> StorageResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, version, body FROM documents WHERE collection = $1 ORDER BY seq",
        )
        .bind(collection.name())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        expected_version: i64,
        body: Value,
    ) -> StorageResult<Document> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET body = $4, version = version + 1, updated_at = NOW()
            WHERE collection = $1 AND id = $2 AND version = $3
            RETURNING id, version, body
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(expected_version)
        .bind(Json(body))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(collection, e))?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        // Nothing matched: either the row is gone or its version moved on.
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM documents WHERE collection = $1 AND id = $2)",
        )
        .bind(collection.name())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(collection, e))?;

        if exists {
            Err(StorageError::VersionConflict {
                collection,
                id,
                expected: expected_version,
            })
        } else {
            Err(StorageError::NotFound { collection, id })
        }
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(result.rows_affected() > 0)
    }
}
