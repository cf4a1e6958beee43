//! Attempt store trait defining access to per-account verification metadata.
//!
//! The store is a key-value view over account metadata: point reads and writes,
//! an atomic increment for the resend counter, and set-oriented count/list
//! queries driven by a [`StatusPredicate`]. Implementations map their own
//! failures to [`DomainError::StoreUnavailable`].
//!
//! # Example Implementation
//! ```no_run
//! use async_trait::async_trait;
//! use av_core::domain::{AccountId, StatusPredicate, VerificationRecord};
//! use av_core::errors::DomainResult;
//! use av_core::repositories::AttemptStore;
//!
//! struct EmptyStore;
//!
//! #[async_trait]
//! impl AttemptStore for EmptyStore {
//!     async fn account_exists(&self, _id: AccountId) -> DomainResult<bool> { Ok(false) }
//!     async fn get_field(&self, _id: AccountId, _key: &str) -> DomainResult<Option<String>> { Ok(None) }
//!     async fn set_field(&self, _id: AccountId, _key: &str, _value: &str) -> DomainResult<()> { Ok(()) }
//!     async fn increment_field(&self, _id: AccountId, _key: &str) -> DomainResult<u32> { Ok(1) }
//!     async fn count_accounts(&self, _p: &StatusPredicate) -> DomainResult<u64> { Ok(0) }
//!     async fn list_accounts(&self, _p: &StatusPredicate, _limit: u32, _offset: u64) -> DomainResult<Vec<AccountId>> { Ok(vec![]) }
//! }
//! ```
//!
//! [`DomainError::StoreUnavailable`]: crate::errors::DomainError::StoreUnavailable

use async_trait::async_trait;

use crate::domain::entities::{AccountId, VerificationRecord, ATTEMPTS_KEY, LOCK_KEY};
use crate::domain::value_objects::StatusPredicate;
use crate::errors::DomainResult;

#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Whether the identifier resolves to an account
    async fn account_exists(&self, id: AccountId) -> DomainResult<bool>;

    /// Read one metadata entry
    async fn get_field(&self, id: AccountId, key: &str) -> DomainResult<Option<String>>;

    /// Write one metadata entry, creating it if absent
    async fn set_field(&self, id: AccountId, key: &str, value: &str) -> DomainResult<()>;

    /// Atomically add one to a numeric entry and return the new value.
    ///
    /// An absent or unparseable entry counts as 0 before the increment.
    async fn increment_field(&self, id: AccountId, key: &str) -> DomainResult<u32>;

    /// Number of accounts matching the predicate, accounts without metadata included
    async fn count_accounts(&self, predicate: &StatusPredicate) -> DomainResult<u64>;

    /// Matching account ids ordered by id
    async fn list_accounts(
        &self,
        predicate: &StatusPredicate,
        limit: u32,
        offset: u64,
    ) -> DomainResult<Vec<AccountId>>;

    /// Read both verification entries of an account
    async fn load_record(&self, id: AccountId) -> DomainResult<VerificationRecord> {
        let lock = self.get_field(id, LOCK_KEY).await?;
        let attempts = self.get_field(id, ATTEMPTS_KEY).await?;
        Ok(VerificationRecord::from_stored(lock.as_deref(), attempts.as_deref()))
    }
}
