/**
 * Server Configuration
 *
 * Opens the document store selected by `AppConfig`.
 *
 * # Store Selection
 *
 * - `database_url` set: PostgreSQL, with migrations run on connect
 * - `database_url` unset: in-memory store; documents do not survive a restart
 *
 * Unlike optional services, a configured database that cannot be reached
 * is a startup error.
 */

use std::sync::Arc;

use crate::backend::store::{Database, PostgresDocumentStore, StorageResult};
use crate::shared::AppConfig;

/// Load the document store for this configuration
pub async fn load_database(config: &AppConfig) -> StorageResult<Database> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set. Documents are kept in memory only.");
        return Ok(Database::in_memory());
    };

    let store = PostgresDocumentStore::connect(database_url)
        .await
        .inspect_err(|e| tracing::error!("Failed to open database: {}", e))?;

    Ok(Database::new(Arc::new(store)))
}
