//! Types for verification service results

use serde::{Deserialize, Serialize};

use crate::domain::entities::{AccountId, BulkAction, QuickAction, VerificationStatus};

/// Classified status of one account, as rendered by status views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub status: VerificationStatus,
    /// Resend attempts so far (absent counts as 0)
    pub attempts: u32,
    pub max_attempts: u32,
    /// Resends left before lockout, 0 once at or past the ceiling
    pub remaining_attempts: u32,
}

/// Result of an unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockOutcome {
    pub account_id: AccountId,
    /// Whether the account was locked before this call
    pub was_locked: bool,
}

/// Result of a resend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResendOutcome {
    /// Notifier was called; carries the status re-read after the send
    Sent { summary: VerificationSummary },
    /// Account is verified, nothing was sent
    AlreadyVerified,
}

/// Dashboard statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationStats {
    pub total: u64,
    pub verified: u64,
    /// Includes locked-out accounts
    pub unverified: u64,
    pub locked_out: u64,
    /// Percentage of verified accounts, one decimal
    pub verification_rate: f64,
}

/// Outcome of a bulk run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSummary {
    pub action: BulkAction,
    pub succeeded: usize,
    pub attempted: usize,
}

impl BulkSummary {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// What the bulk dispatcher did with an action name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkDispatch {
    Handled(BulkSummary),
    /// The action belongs to another handler; nothing was touched
    PassThrough,
}

/// A freshly minted quick action token. The plain token is only ever returned here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionToken {
    pub token: String,
    pub account_id: AccountId,
    pub action: QuickAction,
    pub expires_in: u64,
}

/// One-time notice shown after a quick action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickActionNotice {
    Unlocked,
    Resent,
    AlreadyVerified,
}

/// Result of a quick action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickActionOutcome {
    pub account_id: AccountId,
    pub notice: QuickActionNotice,
}
