/**
 * Password Hashing
 *
 * bcrypt with a random salt; the work factor comes from `AppConfig`.
 * Hashing and verification run on tokio's blocking pool so a slow work
 * factor never stalls the async workers.
 */

use bcrypt::{hash, verify, BcryptError};
use thiserror::Error;
use tokio::task::{spawn_blocking, JoinError};

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] JoinError),
}

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    Ok(spawn_blocking(move || hash(password, cost)).await??)
}

/// Check a password against a stored hash
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: &str, password_hash: &str) -> bool {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let result = spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(PasswordError::from)
        .and_then(|verified| verified.map_err(PasswordError::from));

    result.unwrap_or_else(|e| {
        tracing::error!("Password verification error: {:?}", e);
        false
    })
}
