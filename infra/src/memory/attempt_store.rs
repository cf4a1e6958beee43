//! Linear-scan attempt store kept entirely in memory.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use av_core::domain::entities::verification::parse_attempts;
use av_core::domain::{AccountId, StatusPredicate, ATTEMPTS_KEY, LOCK_KEY};
use av_core::errors::DomainResult;
use av_core::repositories::AttemptStore;

type Metadata = HashMap<String, String>;

/// Accounts and their metadata, ordered by id
#[derive(Default)]
pub struct InMemoryAttemptStore {
    accounts: RwLock<BTreeMap<AccountId, Metadata>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account with no metadata; existing metadata is kept
    pub async fn insert_account(&self, id: AccountId) {
        self.accounts.write().await.entry(id).or_default();
    }

    /// Register an account with raw verification entries
    pub async fn seed(&self, id: AccountId, lock: Option<&str>, attempts: Option<&str>) {
        let mut accounts = self.accounts.write().await;
        let meta = accounts.entry(id).or_default();
        if let Some(lock) = lock {
            meta.insert(LOCK_KEY.to_string(), lock.to_string());
        }
        if let Some(attempts) = attempts {
            meta.insert(ATTEMPTS_KEY.to_string(), attempts.to_string());
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn matching(&self, predicate: &StatusPredicate) -> Vec<AccountId> {
        self.accounts
            .read()
            .await
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

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn account_exists(&self, id: AccountId) -> DomainResult<bool> {
        Ok(self.accounts.read().await.contains_key(&id))
    }

    async fn get_field(&self, id: AccountId, key: &str) -> DomainResult<Option<String>> {
        Ok(self
            .accounts
            .read()
            .await
            .get(&id)
            .and_then(|meta| meta.get(key).cloned()))
    }

    async fn set_field(&self, id: AccountId, key: &str, value: &str) -> DomainResult<()> {
        self.accounts
            .write()
            .await
            .entry(id)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn increment_field(&self, id: AccountId, key: &str) -> DomainResult<u32> {
        let mut accounts = self.accounts.write().await;
        let meta = accounts.entry(id).or_default();
        let next = meta
            .get(key)
            .map(|v| parse_attempts(v))
            .unwrap_or(0)
            .saturating_add(1);
        meta.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn count_accounts(&self, predicate: &StatusPredicate) -> DomainResult<u64> {
        Ok(self.matching(predicate).await.len() as u64)
    }

    async fn list_accounts(
        &self,
        predicate: &StatusPredicate,
        limit: u32,
        offset: u64,
    ) -> DomainResult<Vec<AccountId>> {
        Ok(self
            .matching(predicate)
            .await
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
