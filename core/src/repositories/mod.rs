pub mod action_token;
pub mod attempt;

pub use action_token::{ActionTokenStore, MockActionTokenStore};
pub use attempt::{AttemptStore, MockAttemptStore};
