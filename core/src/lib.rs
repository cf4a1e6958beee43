//! # Account Verify Core
//!
//! Domain layer for the account verification engine.
//! This crate contains the verification record model, the status classifier,
//! the lockout engine, the aggregate counter, the bulk runner and the storage
//! and delivery traits that infrastructure adapters implement.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
