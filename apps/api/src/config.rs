//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Signing key used when `JWT_SECRET` is unset. Development only.
pub const DEV_JWT_SECRET: &str = "pokerhall-dev-secret-change-in-production";

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address the HTTP server binds to
    pub http_addr: SocketAddr,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Maximum pooled database connections
    pub db_max_connections: u32,

    /// JWT secret key for signing tokens
    #[serde(skip_serializing)]
    pub jwt_secret: String,

    /// JWT lifetime in seconds
    pub jwt_lifetime_secs: i64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_addr: env::var("POKERHALL_HTTP_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("POKERHALL_HTTP_ADDR".to_string()))?,

            database_path: env::var("POKERHALL_DATABASE_PATH")
                .unwrap_or_else(|_| "./pokerhall.db".to_string())
                .into(),

            db_max_connections: env::var("POKERHALL_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("POKERHALL_DB_MAX_CONNECTIONS".to_string()))?,

            // In production, this MUST be set via environment variable
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),

            jwt_lifetime_secs: env::var("JWT_LIFETIME_SECS")
                .unwrap_or_else(|_| "7200".to_string()) // 2 hours
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration for tests: in-memory database, fixed secret.
    pub fn for_tests() -> Self {
        ApiConfig {
            http_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database_path: PathBuf::from(":memory:"),
            db_max_connections: 1,
            jwt_secret: "test-secret".to_string(),
            jwt_lifetime_secs: 7200,
        }
    }

    /// True when the development signing key is in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }
        if self.jwt_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()));
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "POKERHALL_DB_MAX_CONNECTIONS".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ApiConfig::for_tests();
        assert!(config.validate().is_ok());

        config.jwt_lifetime_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = ApiConfig::for_tests();
        config.jwt_secret.clear();
        assert!(matches!(config.validate(), Err(ConfigError::MissingRequired(_))));
    }

    #[test]
    fn test_dev_secret_detection() {
        let mut config = ApiConfig::for_tests();
        assert!(!config.uses_dev_secret());
        config.jwt_secret = DEV_JWT_SECRET.to_string();
        assert!(config.uses_dev_secret());
    }
}
