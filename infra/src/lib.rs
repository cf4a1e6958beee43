//! # Infrastructure Layer
//!
//! Concrete adapters for the verification engine's storage and delivery traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL attempt store using SQLx
//! - **Cache**: Redis client and the single-use action token store
//! - **Memory**: in-process stores for development and tests
//! - **Notify**: verification email delivery (mock, HTTP mail API, attempt tracking)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis token storage (default)

use av_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and token store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// In-process stores
pub mod memory;

/// Verification email delivery
pub mod notify;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for the mail API
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail API rejected the request
    #[error("Notifier error: {0}")]
    Notifier(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(_) | InfrastructureError::Cache(_) => {
                DomainError::StoreUnavailable {
                    message: err.to_string(),
                }
            }
            InfrastructureError::Http(_) | InfrastructureError::Notifier(_) => {
                DomainError::NotifierFailure {
                    message: err.to_string(),
                }
            }
            InfrastructureError::Config(_) | InfrastructureError::General(_) => {
                DomainError::Internal {
                    message: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping_to_domain() {
        let err: DomainError = InfrastructureError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, DomainError::StoreUnavailable { .. }));

        let err: DomainError = InfrastructureError::Notifier("status 500".into()).into();
        assert!(matches!(err, DomainError::NotifierFailure { .. }));

        let err: DomainError = InfrastructureError::Config("missing endpoint".into()).into();
        assert!(matches!(err, DomainError::Internal { .. }));
    }
}
