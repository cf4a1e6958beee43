//! Domain entities representing accounts and their verification metadata.

pub mod account;
pub mod action;
pub mod verification;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use account::AccountId;
pub use action::{BulkAction, QuickAction};
pub use verification::{
    LockState, VerificationRecord, VerificationStatus, ATTEMPTS_KEY, DEFAULT_MAX_ATTEMPTS,
    LOCK_KEY, UNLOCKED_VALUE,
};
