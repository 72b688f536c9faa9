/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * Keys are derived once from the configured secret and shared through
 * `AppState`.
 */

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::AppConfig;

/// Identity carried in the token payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUser {
    /// User ID
    pub id: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenUser,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Bad signature, expired, malformed, or not naming a user id
    #[error("invalid token")]
    InvalidToken,

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Token issuer and verifier
#[derive(Clone)]
pub struct Sessions {
    keys: Arc<Keys>,
    ttl_secs: i64,
}

impl Sessions {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    /// Create a JWT token for a user
    pub fn create_token(&self, user_id: Uuid) -> Result<String, SessionError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user: TokenUser {
                id: user_id.to_string(),
            },
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)?)
    }

    /// Verify a token and return the user id it names
    pub fn verify_token(&self, token: &str) -> Result<Uuid, SessionError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            SessionError::InvalidToken
        })?;

        Uuid::parse_str(&data.claims.user.id).map_err(|_| SessionError::InvalidToken)
    }
}
