//! In-process stores.
//!
//! Used by the development server profile and by API tests. They implement
//! the same traits and predicate semantics as the MySQL and Redis adapters.

pub mod action_token_store;
pub mod attempt_store;


pub use action_token_store::InMemoryActionTokenStore;
pub use attempt_store::InMemoryAttemptStore;
