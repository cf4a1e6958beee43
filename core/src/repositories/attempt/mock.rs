//! Mock implementation of AttemptStore for testing.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::domain::entities::{AccountId, ATTEMPTS_KEY, LOCK_KEY};
use crate::domain::entities::verification::parse_attempts;
use crate::domain::value_objects::StatusPredicate;
use crate::errors::{DomainError, DomainResult};

use super::AttemptStore;

type Metadata = HashMap<String, String>;

/// Mock implementation of AttemptStore for testing
///
/// Failure injection: `set_should_fail` makes every call return
/// `StoreUnavailable`; `fail_after_writes(n)` lets `n` writes through first.
pub struct MockAttemptStore {
    accounts: Arc<Mutex<BTreeMap<AccountId, Metadata>>>,
    should_fail: Arc<Mutex<bool>>,
    writes_before_failure: Arc<Mutex<Option<usize>>>,
    writes: Arc<Mutex<Vec<(AccountId, String, String)>>>,
}

impl MockAttemptStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(BTreeMap::new())),
            should_fail: Arc::new(Mutex::new(false)),
            writes_before_failure: Arc::new(Mutex::new(None)),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register an account without any verification metadata
    pub fn with_account(self, id: u64) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .entry(AccountId::new(id))
            .or_default();
        self
    }

    /// Register an account with raw lock and attempts values
    pub fn with_record(self, id: u64, lock: Option<&str>, attempts: Option<&str>) -> Self {
        {
            let mut accounts = self.accounts.lock().unwrap();
            let meta = accounts.entry(AccountId::new(id)).or_default();
            if let Some(lock) = lock {
                meta.insert(LOCK_KEY.to_string(), lock.to_string());
            }
            if let Some(attempts) = attempts {
                meta.insert(ATTEMPTS_KEY.to_string(), attempts.to_string());
            }
        }
        self
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Allow `writes` more writes, then fail every call
    pub fn fail_after_writes(&self, writes: usize) {
        *self.writes_before_failure.lock().unwrap() = Some(writes);
    }

    /// Every write applied so far, in order
    pub fn writes(&self) -> Vec<(AccountId, String, String)> {
        self.writes.lock().unwrap().clone()
    }

    /// Raw stored value of an entry
    pub fn raw(&self, id: u64, key: &str) -> Option<String> {
        self.accounts
            .lock()
            .unwrap()
            .get(&AccountId::new(id))
            .and_then(|meta| meta.get(key).cloned())
    }

    fn check_available(&self) -> DomainResult<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::StoreUnavailable {
                message: "Mock store error".to_string(),
            });
        }
        Ok(())
    }

    fn record_write(&self, id: AccountId, key: &str, value: &str) -> DomainResult<()> {
        let mut budget = self.writes_before_failure.lock().unwrap();
        if let Some(remaining) = budget.as_mut() {
            if *remaining == 0 {
                *self.should_fail.lock().unwrap() = true;
                return Err(DomainError::StoreUnavailable {
                    message: "Mock store went away".to_string(),
                });
            }
            *remaining -= 1;
        }
        self.writes
            .lock()
            .unwrap()
            .push((id, key.to_string(), value.to_string()));
        Ok(())
    }

    fn matching(&self, predicate: &StatusPredicate) -> Vec<AccountId> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, meta)| {
                predicate.matches_stored(
                    meta.get(LOCK_KEY).map(String::as_str),
                    meta.get(ATTEMPTS_KEY).map(String::as_str),
                )
            })
            .map(|(id, _)| *id)
            .collect()
    }
}

impl Default for MockAttemptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttemptStore for MockAttemptStore {
    async fn account_exists(&self, id: AccountId) -> DomainResult<bool> {
        self.check_available()?;
        Ok(self.accounts.lock().unwrap().contains_key(&id))
    }

    async fn get_field(&self, id: AccountId, key: &str) -> DomainResult<Option<String>> {
        self.check_available()?;
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(&id)
            .and_then(|meta| meta.get(key).cloned()))
    }

    async fn set_field(&self, id: AccountId, key: &str, value: &str) -> DomainResult<()> {
        self.check_available()?;
        self.record_write(id, key, value)?;
        self.accounts
            .lock()
            .unwrap()
            .entry(id)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn increment_field(&self, id: AccountId, key: &str) -> DomainResult<u32> {
        self.check_available()?;
        let mut accounts = self.accounts.lock().unwrap();
        let meta = accounts.entry(id).or_default();
        let next = meta
            .get(key)
            .map(|v| parse_attempts(v))
            .unwrap_or(0)
            .saturating_add(1);
        self.record_write(id, key, &next.to_string())?;
        meta.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn count_accounts(&self, predicate: &StatusPredicate) -> DomainResult<u64> {
        self.check_available()?;
        Ok(self.matching(predicate).len() as u64)
    }

    async fn list_accounts(
        &self,
        predicate: &StatusPredicate,
        limit: u32,
        offset: u64,
    ) -> DomainResult<Vec<AccountId>> {
        self.check_available()?;
        Ok(self
            .matching(predicate)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
