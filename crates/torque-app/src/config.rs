//! Application configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults suitable for local development.

use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database path (or `:memory:` for an ephemeral database)
    pub database_path: String,

    /// JWT secret key for signing session tokens
    pub jwt_secret: String,

    /// JWT session token lifetime in seconds
    pub jwt_session_lifetime_secs: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config {
            database_path: env::var("TORQUE_DB_PATH")
                .unwrap_or_else(|_| "torque.db".to_string()),

            jwt_secret: env::var("TORQUE_JWT_SECRET").unwrap_or_else(|_| {
                // In production, this MUST be set via environment variable
                "torque-dev-secret-change-in-production".to_string()
            }),

            jwt_session_lifetime_secs: env::var("TORQUE_JWT_SESSION_LIFETIME_SECS")
                .unwrap_or_else(|_| "28800".to_string()) // 8 hours (one shift)
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("TORQUE_JWT_SESSION_LIFETIME_SECS".to_string())
                })?,
        };

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("TORQUE_JWT_SECRET".to_string()));
        }

        Ok(config)
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
    fn test_load_defaults() {
        // No TORQUE_* variables set in the test environment
        let config = Config::load().unwrap();
        assert_eq!(config.jwt_session_lifetime_secs, 28800);
        assert!(!config.jwt_secret.is_empty());
    }
}
