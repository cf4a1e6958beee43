//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `verification` - Lockout ceiling, required capability, quick action tokens
//! - `auth` - JWT verification for the admin API
//! - `cache` - Redis configuration for single-use action tokens
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `notifier` - Verification email delivery
//! - `server` - HTTP server configuration
//! - `storage` - Memory or MySQL/Redis backend selection

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod notifier;
pub mod server;
pub mod storage;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notifier::{NotifierConfig, NotifierProvider};
pub use server::ServerConfig;
pub use storage::StorageBackend;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Verification engine rules
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend
    #[serde(default = "default_storage")]
    pub storage: StorageBackend,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Admin API authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// Notifier configuration
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            verification: VerificationConfig::default(),
            server: ServerConfig::default(),
            storage: StorageBackend::for_environment(env),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            notifier: NotifierConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

fn default_storage() -> StorageBackend {
    StorageBackend::for_environment(Environment::default())
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file is read first when present; variables already set in the
    /// process environment take precedence over it.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            verification: VerificationConfig::from_env(),
            server: ServerConfig::from_env(),
            storage: StorageBackend::from_env(environment),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            notifier: NotifierConfig::from_env(),
            logging,
        }
    }
}
