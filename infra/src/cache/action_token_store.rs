//! Redis-backed single-use action tokens.
//!
//! Each token digest is one key holding its scope, written with `NX` and a TTL.
//! Consumption is a compare-and-delete script, so a token presented for the
//! wrong account or action is rejected without being burned.

use async_trait::async_trait;

use av_core::errors::{DomainError, DomainResult};
use av_core::repositories::ActionTokenStore;

use super::RedisClient;

pub struct RedisActionTokenStore {
    client: RedisClient,
}

impl RedisActionTokenStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, digest: &str) -> String {
        self.client.make_key(&format!("action_token:{}", digest))
    }
}

#[async_trait]
impl ActionTokenStore for RedisActionTokenStore {
    async fn store(&self, digest: &str, scope: &str, ttl_seconds: u64) -> DomainResult<()> {
        let written = self
            .client
            .set_nx_with_expiry(&self.key(digest), scope, ttl_seconds.max(1))
            .await?;

        if !written {
            tracing::error!("Action token digest collision");
            return Err(DomainError::Internal {
                message: "Action token already exists".to_string(),
            });
        }
        Ok(())
    }

    async fn consume(&self, digest: &str, scope: &str) -> DomainResult<bool> {
        Ok(self.client.take_if_equals(&self.key(digest), scope).await?)
    }
}
