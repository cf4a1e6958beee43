//! MySQL repository implementations

pub mod attempt_store_impl;

pub use attempt_store_impl::MySqlAttemptStore;
