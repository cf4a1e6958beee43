//! Persistence for single-use quick action tokens.
//!
//! Only a digest of the token is handed to the store. A token is bound to a
//! scope string naming the account and the action; consuming it with any other
//! scope must fail and must not burn the token for its real scope.

use async_trait::async_trait;

use crate::errors::DomainResult;

#[async_trait]
pub trait ActionTokenStore: Send + Sync {
    /// Persist a token digest bound to `scope` for `ttl_seconds`
    async fn store(&self, digest: &str, scope: &str, ttl_seconds: u64) -> DomainResult<()>;

    /// Atomically take the token. Returns `false` if it is unknown, expired,
    /// already used or bound to another scope.
    async fn consume(&self, digest: &str, scope: &str) -> DomainResult<bool>;
}
