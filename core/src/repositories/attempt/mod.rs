//! Attempt store module: per-account verification metadata.

mod r#trait;
pub use r#trait::AttemptStore;

mod mock;
pub use mock::MockAttemptStore;
