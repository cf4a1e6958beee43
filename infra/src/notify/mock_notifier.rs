//! Mock notifier for development and testing.
//!
//! Logs each send instead of delivering mail.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use av_core::domain::AccountId;
use av_core::errors::{DomainError, DomainResult};
use av_core::services::verification::Notifier;

#[derive(Clone, Default)]
pub struct MockNotifier {
    /// Number of successful sends
    sent_count: Arc<AtomicU64>,
    /// Recipients in send order
    recipients: Arc<Mutex<Vec<AccountId>>>,
    /// Whether to simulate failures
    simulate_failure: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::SeqCst)
    }

    pub fn recipients(&self) -> Vec<AccountId> {
        self.recipients
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_verification(&self, account_id: AccountId) -> DomainResult<()> {
        if self.simulate_failure {
            warn!(account_id = %account_id, "Mock notifier simulating delivery failure");
            return Err(DomainError::NotifierFailure {
                message: "Simulated delivery failure".to_string(),
            });
        }

        self.sent_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut recipients) = self.recipients.lock() {
            recipients.push(account_id);
        }

        info!(
            account_id = %account_id,
            "[MOCK] Verification email would be sent"
        );
        Ok(())
    }
}
