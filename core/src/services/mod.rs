//! Business services containing the verification-state rules and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    classify, classify_record, ActionToken, AggregateCounter, Authorizer, BulkDispatch,
    BulkOperationRunner, BulkSummary, LockoutEngine, Notifier, QuickActionNotice,
    QuickActionOutcome, QuickActionService, ResendOutcome, UnlockOutcome, VerificationStats,
    VerificationSummary,
};
