//! Admin verification endpoints
//!
//! All handlers are generic over the attempt store, the notifier and the
//! action token store so the same routes serve MySQL/Redis in production and
//! in-memory stores in development and tests.

mod accounts;
mod bulk;
mod quick_actions;
mod stats;

pub use accounts::{account_detail, list_accounts};
pub use bulk::bulk_action;
pub use quick_actions::{issue_action_token, resend, unlock};
pub use stats::stats;
