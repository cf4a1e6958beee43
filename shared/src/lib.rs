//! Shared configuration and common types for the account verification services
//!
//! This crate provides functionality used across all workspace members:
//! - Configuration types (verification rules, database, cache, notifier, server)
//! - Error response structures
//! - Pagination for list endpoints

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    NotifierConfig, NotifierProvider, ServerConfig, StorageBackend, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{PaginatedResponse, Pagination};
