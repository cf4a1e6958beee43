//! Bulk unlock/resend over a list of accounts.

use std::sync::Arc;

use crate::domain::entities::{AccountId, BulkAction};
use crate::errors::DomainResult;
use crate::repositories::AttemptStore;

use super::lockout::LockoutEngine;
use super::traits::{require_capability, Authorizer, Notifier};
use super::types::{BulkDispatch, BulkSummary};
use super::VerificationConfig;

/// Applies one action to many accounts: a single authorization check, then
/// independent per-account attempts. Holds no state between calls.
pub struct BulkOperationRunner<S: AttemptStore, N: Notifier> {
    engine: Arc<LockoutEngine<S, N>>,
    required_capability: String,
}

impl<S: AttemptStore, N: Notifier> BulkOperationRunner<S, N> {
    pub fn new(engine: Arc<LockoutEngine<S, N>>, config: &VerificationConfig) -> Self {
        Self {
            engine,
            required_capability: config.required_capability.clone(),
        }
    }

    /// Entry point for the generic bulk action hook.
    ///
    /// Names other than `verify_unlock` / `verify_resend` are passed through
    /// untouched, before any authorization check.
    pub async fn dispatch(
        &self,
        actor: &dyn Authorizer,
        action_name: &str,
        account_ids: &[AccountId],
    ) -> DomainResult<BulkDispatch> {
        match BulkAction::recognize(action_name) {
            Some(action) => {
                let summary = self.run(actor, action, account_ids).await?;
                Ok(BulkDispatch::Handled(summary))
            }
            None => {
                tracing::debug!(action = action_name, "Bulk action not handled here");
                Ok(BulkDispatch::PassThrough)
            }
        }
    }

    /// Run an action over the accounts in input order.
    ///
    /// Missing accounts and delivery failures are logged and counted as not
    /// succeeded. A store outage stops the run and is returned.
    pub async fn run(
        &self,
        actor: &dyn Authorizer,
        action: BulkAction,
        account_ids: &[AccountId],
    ) -> DomainResult<BulkSummary> {
        require_capability(actor, &self.required_capability)?;

        let attempted = account_ids.len();
        let mut succeeded = 0usize;

        for (processed, &account_id) in account_ids.iter().enumerate() {
            let result = match action {
                BulkAction::Unlock => self.engine.unlock(account_id).await.map(|_| ()),
                BulkAction::Resend => self.engine.resend(account_id).await.map(|_| ()),
            };

            match result {
                Ok(()) => succeeded += 1,
                Err(e) if e.is_store_unavailable() => {
                    tracing::error!(
                        action = %action,
                        account_id = %account_id,
                        processed = processed,
                        succeeded = succeeded,
                        attempted = attempted,
                        error = %e,
                        "Bulk verification action aborted, store unavailable"
                    );
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(
                        action = %action,
                        account_id = %account_id,
                        error = %e,
                        "Bulk verification action failed for account"
                    );
                }
            }
        }

        tracing::info!(
            action = %action,
            succeeded = succeeded,
            attempted = attempted,
            event = "bulk_action_completed",
            "Bulk verification action completed"
        );

        Ok(BulkSummary {
            action,
            succeeded,
            attempted,
        })
    }
}
