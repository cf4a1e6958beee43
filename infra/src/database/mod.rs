//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and migrations
//! - Translation of status predicates to SQL
//! - The MySQL attempt store

pub mod connection;
pub mod mysql;
pub mod predicate_sql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlAttemptStore;

pub use av_shared::config::DatabaseConfig;
