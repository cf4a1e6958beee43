//! Single-account quick actions guarded by single-use tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::entities::{AccountId, QuickAction, VerificationStatus};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ActionTokenStore, AttemptStore};

use super::lockout::LockoutEngine;
use super::traits::{require_capability, Authorizer, Notifier};
use super::types::{ActionToken, QuickActionNotice, QuickActionOutcome, ResendOutcome};
use super::VerificationConfig;

/// Random bytes per token before encoding
const TOKEN_BYTES: usize = 32;

/// Scope a token is bound to
pub fn token_scope(account_id: AccountId, action: QuickAction) -> String {
    format!("{}:{}", account_id, action)
}

fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub struct QuickActionService<S: AttemptStore, N: Notifier, T: ActionTokenStore> {
    engine: Arc<LockoutEngine<S, N>>,
    tokens: Arc<T>,
    required_capability: String,
    ttl_seconds: u64,
}

impl<S: AttemptStore, N: Notifier, T: ActionTokenStore> QuickActionService<S, N, T> {
    pub fn new(
        engine: Arc<LockoutEngine<S, N>>,
        tokens: Arc<T>,
        config: &VerificationConfig,
    ) -> Self {
        Self {
            engine,
            tokens,
            required_capability: config.required_capability.clone(),
            ttl_seconds: config.action_token_ttl(),
        }
    }

    /// Mint a token for one action on one account.
    ///
    /// Only the SHA-256 digest is stored; the plain token is returned once.
    pub async fn issue_token(
        &self,
        actor: &dyn Authorizer,
        account_id: AccountId,
        action: QuickAction,
    ) -> DomainResult<ActionToken> {
        require_capability(actor, &self.required_capability)?;
        self.engine.status(account_id).await?;

        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        self.tokens
            .store(
                &token_digest(&token),
                &token_scope(account_id, action),
                self.ttl_seconds,
            )
            .await?;

        tracing::debug!(
            account_id = %account_id,
            action = %action,
            "Issued quick action token"
        );

        Ok(ActionToken {
            token,
            account_id,
            action,
            expires_in: self.ttl_seconds,
        })
    }

    /// Consume the token and run the action.
    ///
    /// A wrong, expired, reused or foreign-scope token fails with
    /// `InvalidActionToken` before anything is written.
    ///
    /// The token is spent as soon as it is accepted. If the action then fails
    /// (`NotifierFailure`, `StoreUnavailable`), the token stays used and a new
    /// one has to be issued to retry.
    pub async fn execute(
        &self,
        actor: &dyn Authorizer,
        account_id: AccountId,
        action: QuickAction,
        token: &str,
    ) -> DomainResult<QuickActionOutcome> {
        require_capability(actor, &self.required_capability)?;

        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::InvalidActionToken);
        }

        let consumed = self
            .tokens
            .consume(&token_digest(token), &token_scope(account_id, action))
            .await?;
        if !consumed {
            tracing::warn!(
                account_id = %account_id,
                action = %action,
                event = "action_token_rejected",
                "Quick action token rejected"
            );
            return Err(DomainError::InvalidActionToken);
        }

        let notice = match action {
            QuickAction::Unlock => {
                self.engine.unlock(account_id).await?;
                QuickActionNotice::Unlocked
            }
            QuickAction::Resend => match self.engine.resend(account_id).await? {
                ResendOutcome::Sent { .. } => QuickActionNotice::Resent,
                ResendOutcome::AlreadyVerified => QuickActionNotice::AlreadyVerified,
            },
        };

        Ok(QuickActionOutcome { account_id, notice })
    }

    /// Row controls to offer: both actions for an unverified account when the
    /// actor holds the capability, otherwise none
    pub async fn available_actions(
        &self,
        actor: &dyn Authorizer,
        account_id: AccountId,
    ) -> DomainResult<Vec<QuickAction>> {
        if !actor.can(&self.required_capability) {
            return Ok(Vec::new());
        }

        let summary = self.engine.status(account_id).await?;
        if summary.status == VerificationStatus::Verified {
            Ok(Vec::new())
        } else {
            Ok(QuickAction::ALL.to_vec())
        }
    }
}
