//! Traits for delivery and permission integration

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::AccountId;
use crate::errors::{DomainError, DomainResult};

/// Trait for verification email delivery
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the verification email for an account.
    ///
    /// Delivery problems are reported as `NotifierFailure`; a store error hit
    /// while recording the attempt is returned unchanged.
    async fn send_verification(&self, account_id: AccountId) -> DomainResult<()>;
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Box<T> {
    async fn send_verification(&self, account_id: AccountId) -> DomainResult<()> {
        (**self).send_verification(account_id).await
    }
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    async fn send_verification(&self, account_id: AccountId) -> DomainResult<()> {
        (**self).send_verification(account_id).await
    }
}

/// Permission check for the acting administrator
pub trait Authorizer: Send + Sync {
    /// Whether the actor holds the named capability
    fn can(&self, capability: &str) -> bool;
}

/// Fail with `Unauthorized` unless the actor holds `capability`
pub(crate) fn require_capability(actor: &dyn Authorizer, capability: &str) -> DomainResult<()> {
    if actor.can(capability) {
        Ok(())
    } else {
        tracing::warn!(
            capability = capability,
            event = "authorization_denied",
            "Actor lacks required capability"
        );
        Err(DomainError::Unauthorized {
            capability: capability.to_string(),
        })
    }
}
