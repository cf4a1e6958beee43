//! Action token store module: single-use tokens guarding quick actions.

mod r#trait;
pub use r#trait::ActionTokenStore;

mod mock;
pub use mock::MockActionTokenStore;
