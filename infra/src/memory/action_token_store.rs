//! Expiring in-memory action token store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use av_core::errors::DomainResult;
use av_core::repositories::ActionTokenStore;

struct StoredToken {
    scope: String,
    /// `None` when the lifetime overflows the clock; such tokens never expire
    expires_at: Option<Instant>,
}

impl StoredToken {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

#[derive(Default)]
pub struct InMemoryActionTokenStore {
    tokens: Mutex<HashMap<String, StoredToken>>,
}

impl InMemoryActionTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens held, including expired ones not yet purged
    pub async fn len(&self) -> usize {
        self.tokens.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop expired tokens; returns how many were removed
    fn purge(tokens: &mut HashMap<String, StoredToken>, now: Instant) -> usize {
        let before = tokens.len();
        tokens.retain(|_, token| !token.is_expired(now));
        before - tokens.len()
    }
}

#[async_trait]
impl ActionTokenStore for InMemoryActionTokenStore {
    async fn store(&self, digest: &str, scope: &str, ttl_seconds: u64) -> DomainResult<()> {
        let now = Instant::now();
        let expires_at = now.checked_add(Duration::from_secs(ttl_seconds));

        let mut tokens = self.tokens.lock().await;
        let purged = Self::purge(&mut tokens, now);
        if purged > 0 {
            tracing::debug!(purged = purged, "Dropped expired action tokens");
        }
        tokens.insert(
            digest.to_string(),
            StoredToken {
                scope: scope.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn consume(&self, digest: &str, scope: &str) -> DomainResult<bool> {
        let mut tokens = self.tokens.lock().await;
        let live = match tokens.get(digest) {
            Some(token) if token.is_expired(Instant::now()) => {
                tokens.remove(digest);
                return Ok(false);
            }
            Some(token) => token.scope == scope,
            None => false,
        };
        if live {
            tokens.remove(digest);
        }
        Ok(live)
    }
}
