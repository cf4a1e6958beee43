//! Verification-state engine
//!
//! This module provides everything that reads or changes an account's
//! verification state:
//! - Status classification from the lock flag and the resend counter
//! - Unlock and resend with idempotence and account resolution
//! - Set-based counting and listing by derived status
//! - Bulk unlock/resend with a single authorization check
//! - Token-guarded single-account quick actions

mod bulk;
mod classifier;
mod counter;
mod lockout;
mod quick_action;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use av_shared::config::VerificationConfig;
pub use bulk::BulkOperationRunner;
pub use classifier::{classify, classify_record};
pub use counter::AggregateCounter;
pub use lockout::LockoutEngine;
pub use quick_action::{token_scope, QuickActionService};
pub use traits::{Authorizer, Notifier};
pub use types::{
    ActionToken, BulkDispatch, BulkSummary, QuickActionNotice, QuickActionOutcome,
    ResendOutcome, UnlockOutcome, VerificationStats, VerificationSummary,
};
