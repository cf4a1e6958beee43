//! Verification metadata attached to an account.
//!
//! A record is two independent metadata entries, never one stored object:
//! the lock flag under [`LOCK_KEY`] and the resend counter under [`ATTEMPTS_KEY`].
//! The status shown to administrators is always derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata key holding the lock flag
pub const LOCK_KEY: &str = "verify-lock";

/// Metadata key holding the resend attempt counter
pub const ATTEMPTS_KEY: &str = "verify-link-attempts";

/// Stored lock value meaning "no restriction". Any other value is a lock token.
pub const UNLOCKED_VALUE: &str = "unlocked";

/// Default resend ceiling
pub const DEFAULT_MAX_ATTEMPTS: u32 = av_shared::config::verification::DEFAULT_MAX_ATTEMPTS;

/// Lock flag of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    Unlocked,
    Locked,
}

impl LockState {
    /// Decode a stored lock value. Absence is handled by the caller as `Unlocked`.
    pub fn from_stored(value: &str) -> Self {
        if value == UNLOCKED_VALUE {
            LockState::Unlocked
        } else {
            LockState::Locked
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked)
    }
}

/// Derived verification status, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Unverified,
    LockedOut,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Unverified => "unverified",
            VerificationStatus::LockedOut => "locked_out",
        };
        f.write_str(label)
    }
}

/// Raw verification metadata for one account, as read from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// `None` when the lock entry has never been written
    pub lock_state: Option<LockState>,

    /// `None` when the attempts entry has never been written
    pub attempt_count: Option<u32>,
}

impl VerificationRecord {
    pub fn new(lock_state: Option<LockState>, attempt_count: Option<u32>) -> Self {
        Self {
            lock_state,
            attempt_count,
        }
    }

    /// Build a record from the raw stored strings.
    ///
    /// Attempt values that do not parse as an unsigned integer read as 0,
    /// the same as an unsigned cast in the SQL store.
    pub fn from_stored(lock: Option<&str>, attempts: Option<&str>) -> Self {
        Self {
            lock_state: lock.map(LockState::from_stored),
            attempt_count: attempts.map(parse_attempts),
        }
    }

    /// Lock state with absence folded into `Unlocked`
    pub fn effective_lock(&self) -> LockState {
        self.lock_state.unwrap_or(LockState::Unlocked)
    }

    /// Attempt count with absence folded into 0
    pub fn attempts(&self) -> u32 {
        self.attempt_count.unwrap_or(0)
    }
}

/// Parse a stored attempt counter.
///
/// Only ASCII digits, optionally padded with spaces, are a count; anything
/// else reads as 0. Counts beyond `u32::MAX` saturate. The MySQL store
/// evaluates the same rule in SQL.
pub fn parse_attempts(value: &str) -> u32 {
    let digits = value.trim_matches(' ');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(u32::MAX)
}
