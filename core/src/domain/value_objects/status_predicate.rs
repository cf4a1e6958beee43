//! Set-oriented form of the verification status rule.
//!
//! A [`StatusPredicate`] is evaluated in memory with [`StatusPredicate::matches`]
//! and translated to SQL by the MySQL attempt store, so every count and list
//! query shares one definition with the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::verification::{parse_attempts, LockState, UNLOCKED_VALUE};
use crate::domain::entities::{VerificationRecord, VerificationStatus};
use crate::errors::DomainError;

/// Filter offered by the admin account list and the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Verified,
    /// Every account that is not verified, locked-out accounts included
    Unverified,
    #[serde(rename = "locked", alias = "locked_out")]
    LockedOut,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Verified => "verified",
            StatusFilter::Unverified => "unverified",
            StatusFilter::LockedOut => "locked",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verified" => Ok(StatusFilter::Verified),
            "unverified" => Ok(StatusFilter::Unverified),
            "locked" | "locked_out" => Ok(StatusFilter::LockedOut),
            other => Err(DomainError::Validation {
                message: format!("Unknown status filter: {}", other),
            }),
        }
    }
}

/// Composable predicate over the two verification metadata entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusPredicate {
    /// The lock entry has never been written
    LockAbsent,
    /// The lock entry is present and equals the value
    LockIs(String),
    /// The lock entry is present and differs from the value
    LockIsNot(String),
    /// Attempt counter (absent or unparseable = 0) is at least the value
    AttemptsAtLeast(u32),
    /// Attempt counter (absent or unparseable = 0) is below the value
    AttemptsBelow(u32),
    All(Vec<StatusPredicate>),
    Any(Vec<StatusPredicate>),
}

impl StatusPredicate {
    /// Lock absent, or explicitly unlocked
    pub fn verified() -> Self {
        StatusPredicate::Any(vec![
            StatusPredicate::LockAbsent,
            StatusPredicate::LockIs(UNLOCKED_VALUE.to_string()),
        ])
    }

    /// Lock present and not unlocked, regardless of attempts
    pub fn unverified() -> Self {
        StatusPredicate::LockIsNot(UNLOCKED_VALUE.to_string())
    }

    /// Unverified with the counter at or past the ceiling
    pub fn locked_out(max_attempts: u32) -> Self {
        StatusPredicate::All(vec![
            Self::unverified(),
            StatusPredicate::AttemptsAtLeast(max_attempts),
        ])
    }

    /// Unverified and still allowed to resend
    pub fn pending(max_attempts: u32) -> Self {
        StatusPredicate::All(vec![
            Self::unverified(),
            StatusPredicate::AttemptsBelow(max_attempts),
        ])
    }

    /// Predicate behind a list/count filter
    pub fn for_filter(filter: StatusFilter, max_attempts: u32) -> Self {
        match filter {
            StatusFilter::Verified => Self::verified(),
            StatusFilter::Unverified => Self::unverified(),
            StatusFilter::LockedOut => Self::locked_out(max_attempts),
        }
    }

    /// Predicate selecting exactly the accounts that classify as `status`
    pub fn for_status(status: VerificationStatus, max_attempts: u32) -> Self {
        match status {
            VerificationStatus::Verified => Self::verified(),
            VerificationStatus::Unverified => Self::pending(max_attempts),
            VerificationStatus::LockedOut => Self::locked_out(max_attempts),
        }
    }

    /// Evaluate against a decoded record.
    ///
    /// Lock comparisons are made on the decoded state, so any non-`unlocked`
    /// value in a predicate means `Locked`.
    pub fn matches(&self, record: &VerificationRecord) -> bool {
        match self {
            StatusPredicate::LockAbsent => record.lock_state.is_none(),
            StatusPredicate::LockIs(value) => {
                record.lock_state == Some(LockState::from_stored(value))
            }
            StatusPredicate::LockIsNot(value) => match record.lock_state {
                Some(state) => state != LockState::from_stored(value),
                None => false,
            },
            StatusPredicate::AttemptsAtLeast(n) => record.attempts() >= *n,
            StatusPredicate::AttemptsBelow(n) => record.attempts() < *n,
            StatusPredicate::All(parts) => parts.iter().all(|p| p.matches(record)),
            StatusPredicate::Any(parts) => parts.iter().any(|p| p.matches(record)),
        }
    }

    /// Evaluate against the raw stored strings, comparing lock values exactly
    pub fn matches_stored(&self, lock: Option<&str>, attempts: Option<&str>) -> bool {
        let count = attempts.map(parse_attempts).unwrap_or(0);
        match self {
            StatusPredicate::LockAbsent => lock.is_none(),
            StatusPredicate::LockIs(value) => lock == Some(value.as_str()),
            StatusPredicate::LockIsNot(value) => matches!(lock, Some(v) if v != value),
            StatusPredicate::AttemptsAtLeast(n) => count >= *n,
            StatusPredicate::AttemptsBelow(n) => count < *n,
            StatusPredicate::All(parts) => parts.iter().all(|p| p.matches_stored(lock, attempts)),
            StatusPredicate::Any(parts) => parts.iter().any(|p| p.matches_stored(lock, attempts)),
        }
    }

    /// Whether evaluation needs the attempts entry
    pub fn reads_attempts(&self) -> bool {
        match self {
            StatusPredicate::AttemptsAtLeast(_) | StatusPredicate::AttemptsBelow(_) => true,
            StatusPredicate::All(parts) | StatusPredicate::Any(parts) => {
                parts.iter().any(|p| p.reads_attempts())
            }
            _ => false,
        }
    }
}
