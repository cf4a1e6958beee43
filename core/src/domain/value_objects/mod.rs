//! Value objects representing immutable domain concepts.

pub mod status_predicate;

// Re-export commonly used types
pub use status_predicate::{StatusFilter, StatusPredicate};
