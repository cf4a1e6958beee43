//! Aggregate counts and filtered listing by derived status.
//!
//! Every number here comes from one predicate query against the store; no
//! record is fetched and classified one by one.

use std::sync::Arc;

use av_shared::Pagination;

use crate::domain::entities::AccountId;
use crate::domain::value_objects::{StatusFilter, StatusPredicate};
use crate::errors::DomainResult;
use crate::repositories::AttemptStore;

use super::types::VerificationStats;
use super::VerificationConfig;

pub struct AggregateCounter<S: AttemptStore> {
    store: Arc<S>,
    max_attempts: u32,
}

impl<S: AttemptStore> AggregateCounter<S> {
    pub fn new(store: Arc<S>, config: &VerificationConfig) -> Self {
        Self {
            store,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Number of accounts matching a filter. `Unverified` includes locked-out accounts.
    pub async fn count(&self, filter: StatusFilter) -> DomainResult<u64> {
        let predicate = StatusPredicate::for_filter(filter, self.max_attempts);
        self.store.count_accounts(&predicate).await
    }

    /// Unverified accounts at or past the resend ceiling
    pub async fn count_locked_out(&self) -> DomainResult<u64> {
        self.count(StatusFilter::LockedOut).await
    }

    /// One page of account ids matching a filter, ordered by id
    pub async fn list(
        &self,
        filter: StatusFilter,
        page: Pagination,
    ) -> DomainResult<Vec<AccountId>> {
        let page = page.validate();
        let predicate = StatusPredicate::for_filter(filter, self.max_attempts);
        self.store
            .list_accounts(&predicate, page.limit(), u64::from(page.offset()))
            .await
    }

    /// Dashboard statistics
    pub async fn stats(&self) -> DomainResult<VerificationStats> {
        let verified = self.count(StatusFilter::Verified).await?;
        let unverified = self.count(StatusFilter::Unverified).await?;
        let locked_out = self.count_locked_out().await?;
        let total = verified + unverified;

        tracing::debug!(
            total = total,
            verified = verified,
            unverified = unverified,
            locked_out = locked_out,
            "Computed verification stats"
        );

        Ok(VerificationStats {
            total,
            verified,
            unverified,
            locked_out,
            verification_rate: verification_rate(verified, total),
        })
    }
}

/// `verified / total * 100` rounded to one decimal, 0 for an empty population
pub(crate) fn verification_rate(verified: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = verified as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}
