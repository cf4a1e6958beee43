//! Type definitions shared by the API layer
//!
//! - `pagination` - Pagination for list endpoints

pub mod pagination;

pub use pagination::{PaginatedResponse, Pagination};
