//! Status classification. Every component that needs a status goes through here.

use crate::domain::entities::{LockState, VerificationRecord, VerificationStatus};

use super::types::VerificationSummary;

/// Classify raw verification metadata.
///
/// A missing lock is `Unlocked` and a missing counter is 0. Only a locked
/// account is ever `Unverified` or `LockedOut`.
pub fn classify(
    lock_state: Option<LockState>,
    attempt_count: Option<u32>,
    max_attempts: u32,
) -> VerificationStatus {
    match lock_state.unwrap_or(LockState::Unlocked) {
        LockState::Unlocked => VerificationStatus::Verified,
        LockState::Locked if attempt_count.unwrap_or(0) < max_attempts => {
            VerificationStatus::Unverified
        }
        LockState::Locked => VerificationStatus::LockedOut,
    }
}

pub fn classify_record(record: &VerificationRecord, max_attempts: u32) -> VerificationStatus {
    classify(record.lock_state, record.attempt_count, max_attempts)
}

impl VerificationSummary {
    /// Build the status view of a record
    pub fn from_record(record: &VerificationRecord, max_attempts: u32) -> Self {
        let attempts = record.attempts();
        Self {
            status: classify_record(record, max_attempts),
            attempts,
            max_attempts,
            remaining_attempts: max_attempts.saturating_sub(attempts),
        }
    }

    /// Short human-readable status, as shown in the account list column
    pub fn label(&self) -> String {
        match self.status {
            VerificationStatus::Verified => "Verified".to_string(),
            VerificationStatus::LockedOut => format!("Locked, {} attempts", self.attempts),
            VerificationStatus::Unverified => format!(
                "Unverified, {}/{} attempts",
                self.attempts, self.max_attempts
            ),
        }
    }
}
