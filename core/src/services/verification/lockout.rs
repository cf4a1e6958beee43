//! Lockout engine: the only code path that changes verification state.

use std::sync::Arc;

use crate::domain::entities::{
    AccountId, LockState, VerificationStatus, ATTEMPTS_KEY, LOCK_KEY, UNLOCKED_VALUE,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AttemptStore;

use super::classifier::classify_record;
use super::traits::Notifier;
use super::types::{ResendOutcome, UnlockOutcome, VerificationSummary};
use super::VerificationConfig;

/// Unlock, resend and status read for single accounts.
///
/// The engine performs no authorization; callers check capabilities first.
pub struct LockoutEngine<S: AttemptStore, N: Notifier> {
    /// Verification metadata store
    store: Arc<S>,
    /// Verification email delivery
    notifier: Arc<N>,
    /// Resend ceiling
    max_attempts: u32,
}

impl<S: AttemptStore, N: Notifier> LockoutEngine<S, N> {
    /// Create a new engine
    ///
    /// # Arguments
    ///
    /// * `store` - Attempt store implementation
    /// * `notifier` - Notifier implementation
    /// * `config` - Verification configuration providing the resend ceiling
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: &VerificationConfig) -> Self {
        Self {
            store,
            notifier,
            max_attempts: config.max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Clear the lock and reset the resend counter.
    ///
    /// Both entries are written even when the account is already unlocked;
    /// repeating the call leaves the same state and still succeeds.
    pub async fn unlock(&self, account_id: AccountId) -> DomainResult<UnlockOutcome> {
        self.ensure_exists(account_id).await?;

        let was_locked = self
            .store
            .get_field(account_id, LOCK_KEY)
            .await?
            .map(|value| LockState::from_stored(&value).is_locked())
            .unwrap_or(false);

        self.store
            .set_field(account_id, LOCK_KEY, UNLOCKED_VALUE)
            .await?;
        self.store.set_field(account_id, ATTEMPTS_KEY, "0").await?;

        tracing::info!(
            account_id = %account_id,
            was_locked = was_locked,
            event = "account_unlocked",
            "Account verification lock cleared"
        );

        Ok(UnlockOutcome {
            account_id,
            was_locked,
        })
    }

    /// Trigger a verification email.
    ///
    /// Verified accounts are skipped. Otherwise the notifier is called with no
    /// ceiling check; the delivery side owns the attempt increment.
    pub async fn resend(&self, account_id: AccountId) -> DomainResult<ResendOutcome> {
        self.ensure_exists(account_id).await?;

        let record = self.store.load_record(account_id).await?;
        if classify_record(&record, self.max_attempts) == VerificationStatus::Verified {
            tracing::info!(
                account_id = %account_id,
                event = "resend_skipped",
                "Account already verified, nothing to resend"
            );
            return Ok(ResendOutcome::AlreadyVerified);
        }

        self.notifier
            .send_verification(account_id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    account_id = %account_id,
                    error = %e,
                    event = "resend_failed",
                    "Verification email delivery failed"
                );
                e
            })?;

        let record = self.store.load_record(account_id).await?;
        let summary = VerificationSummary::from_record(&record, self.max_attempts);

        tracing::info!(
            account_id = %account_id,
            attempts = summary.attempts,
            status = %summary.status,
            event = "verification_resent",
            "Verification email sent"
        );

        Ok(ResendOutcome::Sent { summary })
    }

    /// Read-only status of one account
    pub async fn status(&self, account_id: AccountId) -> DomainResult<VerificationSummary> {
        self.ensure_exists(account_id).await?;
        let record = self.store.load_record(account_id).await?;
        Ok(VerificationSummary::from_record(&record, self.max_attempts))
    }

    async fn ensure_exists(&self, account_id: AccountId) -> DomainResult<()> {
        if self.store.account_exists(account_id).await? {
            Ok(())
        } else {
            Err(DomainError::AccountNotFound { account_id })
        }
    }
}
