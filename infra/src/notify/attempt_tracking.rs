//! Notifier decorator that owns the resend attempt counter.
//!
//! The counter is bumped with the store's atomic increment before the inner
//! notifier runs, so concurrent resends never lose an increment.

use async_trait::async_trait;
use std::sync::Arc;

use av_core::domain::{AccountId, ATTEMPTS_KEY};
use av_core::errors::DomainResult;
use av_core::repositories::AttemptStore;
use av_core::services::verification::Notifier;

pub struct AttemptTrackingNotifier<S: AttemptStore, N: Notifier> {
    store: Arc<S>,
    inner: N,
}

impl<S: AttemptStore, N: Notifier> AttemptTrackingNotifier<S, N> {
    pub fn new(store: Arc<S>, inner: N) -> Self {
        Self { store, inner }
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }
}

#[async_trait]
impl<S: AttemptStore, N: Notifier> Notifier for AttemptTrackingNotifier<S, N> {
    async fn send_verification(&self, account_id: AccountId) -> DomainResult<()> {
        let attempts = self.store.increment_field(account_id, ATTEMPTS_KEY).await?;

        tracing::debug!(account_id = %account_id, attempts = attempts, "Resend attempt recorded");

        self.inner.send_verification(account_id).await
    }
}
