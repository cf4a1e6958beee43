//! Unit tests for token-guarded quick actions

use std::sync::Arc;

use crate::domain::entities::{AccountId, QuickAction, LOCK_KEY};
use crate::errors::DomainError;
use crate::repositories::{AttemptStore, MockActionTokenStore, MockAttemptStore};
use crate::services::verification::{
    LockoutEngine, QuickActionNotice, QuickActionService, VerificationConfig,
};

use super::mocks::{MockAuthorizer, MockNotifier};

type Service = QuickActionService<MockAttemptStore, MockNotifier, MockActionTokenStore>;

fn service(store: MockAttemptStore) -> (Service, Arc<MockAttemptStore>, Arc<MockActionTokenStore>) {
    let config = VerificationConfig::default();
    let store = Arc::new(store);
    let tokens = Arc::new(MockActionTokenStore::new());
    let notifier = Arc::new(MockNotifier::tracking(store.clone()));
    let engine = Arc::new(LockoutEngine::new(store.clone(), notifier, &config));
    (
        QuickActionService::new(engine, tokens.clone(), &config),
        store,
        tokens,
    )
}

#[tokio::test]
async fn test_issue_and_execute_unlock() {
    let (service, store, tokens) = service(MockAttemptStore::new().with_record(1, Some("tok"), Some("5")));
    let admin = MockAuthorizer::admin();

    let token = service
        .issue_token(&admin, AccountId::new(1), QuickAction::Unlock)
        .await
        .unwrap();
    assert_eq!(token.expires_in, 86_400);
    assert!(token.token.len() >= 43);
    assert!(!token.token.contains('+') && !token.token.contains('/'));
    assert_eq!(tokens.len(), 1);

    let outcome = service
        .execute(&admin, AccountId::new(1), QuickAction::Unlock, &token.token)
        .await
        .unwrap();
    assert_eq!(outcome.account_id, AccountId::new(1));
    assert_eq!(outcome.notice, QuickActionNotice::Unlocked);
    assert_eq!(store.raw(1, LOCK_KEY).as_deref(), Some("unlocked"));
}

#[tokio::test]
async fn test_token_is_single_use() {
    let (service, _store, _tokens) = service(MockAttemptStore::new().with_record(1, Some("tok"), None));
    let admin = MockAuthorizer::admin();

    let token = service
        .issue_token(&admin, AccountId::new(1), QuickAction::Resend)
        .await
        .unwrap();

    let first = service
        .execute(&admin, AccountId::new(1), QuickAction::Resend, &token.token)
        .await
        .unwrap();
    assert_eq!(first.notice, QuickActionNotice::Resent);

    let second = service
        .execute(&admin, AccountId::new(1), QuickAction::Resend, &token.token)
        .await;
    assert!(matches!(second, Err(DomainError::InvalidActionToken)));
}

#[tokio::test]
async fn test_token_is_spent_when_the_action_fails() {
    let (service, store, _tokens) = service(MockAttemptStore::new().with_record(1, Some("tok"), None));
    let admin = MockAuthorizer::admin();

    let token = service
        .issue_token(&admin, AccountId::new(1), QuickAction::Resend)
        .await
        .unwrap();

    store.fail_after_writes(0);
    let first = service
        .execute(&admin, AccountId::new(1), QuickAction::Resend, &token.token)
        .await;
    assert!(matches!(first, Err(DomainError::StoreUnavailable { .. })));

    let retry = service
        .execute(&admin, AccountId::new(1), QuickAction::Resend, &token.token)
        .await;
    assert!(matches!(retry, Err(DomainError::InvalidActionToken)));
}

#[tokio::test]
async fn test_token_is_scoped_to_account_and_action() {
    let (service, store, _tokens) = service(
        MockAttemptStore::new()
            .with_record(1, Some("tok"), None)
            .with_record(2, Some("tok"), None),
    );
    let admin = MockAuthorizer::admin();

    let token = service
        .issue_token(&admin, AccountId::new(1), QuickAction::Unlock)
        .await
        .unwrap();

    let other_account = service
        .execute(&admin, AccountId::new(2), QuickAction::Unlock, &token.token)
        .await;
    assert!(matches!(other_account, Err(DomainError::InvalidActionToken)));

    let other_action = service
        .execute(&admin, AccountId::new(1), QuickAction::Resend, &token.token)
        .await;
    assert!(matches!(other_action, Err(DomainError::InvalidActionToken)));
    assert!(store.writes().is_empty());

    // Misuse does not burn the token for its own scope
    service
        .execute(&admin, AccountId::new(1), QuickAction::Unlock, &token.token)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_expired_or_garbage_token() {
    let (service, store, tokens) = service(MockAttemptStore::new().with_record(1, Some("tok"), None));
    let admin = MockAuthorizer::admin();

    let token = service
        .issue_token(&admin, AccountId::new(1), QuickAction::Unlock)
        .await
        .unwrap();
    tokens.expire_all();

    for candidate in [token.token.as_str(), "not-a-token", "  "] {
        let result = service
            .execute(&admin, AccountId::new(1), QuickAction::Unlock, candidate)
            .await;
        assert!(matches!(result, Err(DomainError::InvalidActionToken)));
    }
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_quick_actions_require_capability() {
    let (service, store, tokens) = service(MockAttemptStore::new().with_record(1, Some("tok"), None));
    let nobody = MockAuthorizer::nobody();

    assert!(matches!(
        service.issue_token(&nobody, AccountId::new(1), QuickAction::Unlock).await,
        Err(DomainError::Unauthorized { .. })
    ));
    assert!(matches!(
        service.execute(&nobody, AccountId::new(1), QuickAction::Unlock, "x").await,
        Err(DomainError::Unauthorized { .. })
    ));
    assert!(tokens.is_empty());
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_issue_token_for_unknown_account() {
    let (service, _store, tokens) = service(MockAttemptStore::new());
    let result = service
        .issue_token(&MockAuthorizer::admin(), AccountId::new(99), QuickAction::Unlock)
        .await;
    assert!(matches!(result, Err(DomainError::AccountNotFound { .. })));
    assert!(tokens.is_empty());
}

#[tokio::test]
async fn test_available_actions() {
    let (service, _store, _tokens) = service(
        MockAttemptStore::new()
            .with_record(1, Some("tok"), Some("5"))
            .with_record(2, Some("unlocked"), None),
    );

    let locked = service
        .available_actions(&MockAuthorizer::admin(), AccountId::new(1))
        .await
        .unwrap();
    assert_eq!(locked, vec![QuickAction::Unlock, QuickAction::Resend]);

    let verified = service
        .available_actions(&MockAuthorizer::admin(), AccountId::new(2))
        .await
        .unwrap();
    assert!(verified.is_empty());

    let no_capability = service
        .available_actions(&MockAuthorizer::nobody(), AccountId::new(1))
        .await
        .unwrap();
    assert!(no_capability.is_empty());
}

#[tokio::test]
async fn test_quick_resend_after_verification() {
    let (service, store, _tokens) = service(MockAttemptStore::new().with_record(1, Some("tok"), None));
    let admin = MockAuthorizer::admin();

    let token = service
        .issue_token(&admin, AccountId::new(1), QuickAction::Resend)
        .await
        .unwrap();
    store
        .set_field(AccountId::new(1), LOCK_KEY, "unlocked")
        .await
        .unwrap();

    let outcome = service
        .execute(&admin, AccountId::new(1), QuickAction::Resend, &token.token)
        .await
        .unwrap();
    assert_eq!(outcome.notice, QuickActionNotice::AlreadyVerified);
}
