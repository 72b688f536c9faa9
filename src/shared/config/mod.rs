//! Application configuration module
//!
//! Configuration is read once at startup (environment, optionally seeded from
//! a `.env` file) and then handed to `create_app`. Nothing reads the
//! environment after that point.

use std::fmt;

use thiserror::Error;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Default token lifetime: 100 hours
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 360_000;

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// bcrypt work factor used when hashing passwords
    pub bcrypt_cost: u32,
    /// Lifetime of issued tokens in seconds
    pub token_ttl_secs: u64,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Reads `JWT_SECRET`, `PORT`, `DATABASE_URL`, `BCRYPT_COST` and
    /// `TOKEN_TTL_SECS`. A `.env` file in the working directory is loaded
    /// first if present.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        dotenv::dotenv().ok();

        let mut builder = AppConfig::builder();

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Ok(port) = std::env::var("PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("PORT", port.clone()))?;
            builder = builder.port(port);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                builder = builder.database_url(url);
            }
        }
        if let Ok(cost) = std::env::var("BCRYPT_COST") {
            let cost = cost
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue("BCRYPT_COST", cost.clone()))?;
            builder = builder.bcrypt_cost(cost);
        }
        if let Ok(ttl) = std::env::var("TOKEN_TTL_SECS") {
            let ttl = ttl
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue("TOKEN_TTL_SECS", ttl.clone()))?;
            builder = builder.token_ttl_secs(ttl);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        // bcrypt rejects costs outside 4..=31
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "BCRYPT_COST",
                self.bcrypt_cost.to_string(),
            ));
        }
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue("TOKEN_TTL_SECS", "0".to_string()));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    bcrypt_cost: Option<u32>,
    token_ttl_secs: Option<u64>,
}

impl AppConfigBuilder {
    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the PostgreSQL connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the token lifetime in seconds
    pub fn token_ttl_secs(mut self, secs: u64) -> Self {
        self.token_ttl_secs = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            jwt_secret: self
                .jwt_secret
                .ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url,
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            token_ttl_secs: self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
