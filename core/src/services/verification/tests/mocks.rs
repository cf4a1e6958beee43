//! Mock implementations for testing the verification engine

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::{AccountId, ATTEMPTS_KEY};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AttemptStore, MockAttemptStore};
use crate::services::verification::traits::{Authorizer, Notifier};

// Mock notifier; with a store attached it also bumps the attempt counter,
// the way the delivery side does in production
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<AccountId>>>,
    pub should_fail: bool,
    store: Option<Arc<MockAttemptStore>>,
}

impl MockNotifier {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
            store: None,
        }
    }

    pub fn tracking(store: Arc<MockAttemptStore>) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
            store: Some(store),
        }
    }

    pub fn sent_to(&self) -> Vec<AccountId> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_verification(&self, account_id: AccountId) -> DomainResult<()> {
        if let Some(store) = &self.store {
            store.increment_field(account_id, ATTEMPTS_KEY).await?;
        }
        if self.should_fail {
            return Err(DomainError::NotifierFailure {
                message: "Mail transport error".to_string(),
            });
        }
        self.sent.lock().unwrap().push(account_id);
        Ok(())
    }
}

// Mock actor holding a fixed set of capabilities
pub struct MockAuthorizer {
    pub capabilities: Vec<String>,
}

impl MockAuthorizer {
    pub fn admin() -> Self {
        Self {
            capabilities: vec!["edit_users".to_string()],
        }
    }

    pub fn nobody() -> Self {
        Self {
            capabilities: Vec::new(),
        }
    }
}

impl Authorizer for MockAuthorizer {
    fn can(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

pub fn ids(raw: &[u64]) -> Vec<AccountId> {
    raw.iter().copied().map(AccountId::new).collect()
}
