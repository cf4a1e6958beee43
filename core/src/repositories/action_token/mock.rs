//! Mock implementation of ActionTokenStore for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::{DomainError, DomainResult};

use super::ActionTokenStore;

/// Mock token store without expiry; `expire_all` simulates the TTL passing
pub struct MockActionTokenStore {
    tokens: Arc<Mutex<HashMap<String, String>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockActionTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Drop every stored token
    pub fn expire_all(&self) {
        self.tokens.lock().unwrap().clear();
    }

    /// Number of live tokens
    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> DomainResult<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::StoreUnavailable {
                message: "Mock token store error".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockActionTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionTokenStore for MockActionTokenStore {
    async fn store(&self, digest: &str, scope: &str, _ttl_seconds: u64) -> DomainResult<()> {
        self.check_available()?;
        self.tokens
            .lock()
            .unwrap()
            .insert(digest.to_string(), scope.to_string());
        Ok(())
    }

    async fn consume(&self, digest: &str, scope: &str) -> DomainResult<bool> {
        self.check_available()?;
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.get(digest) {
            Some(bound) if bound == scope => {
                tokens.remove(digest);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
