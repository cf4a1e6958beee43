//! Unit tests for the bulk runner

use std::sync::Arc;

use crate::domain::entities::{AccountId, BulkAction, VerificationStatus, ATTEMPTS_KEY};
use crate::errors::DomainError;
use crate::repositories::MockAttemptStore;
use crate::services::verification::{
    BulkDispatch, BulkOperationRunner, LockoutEngine, VerificationConfig,
};

use super::mocks::{ids, MockAuthorizer, MockNotifier};

struct Fixture {
    store: Arc<MockAttemptStore>,
    notifier: Arc<MockNotifier>,
    engine: Arc<LockoutEngine<MockAttemptStore, MockNotifier>>,
    runner: BulkOperationRunner<MockAttemptStore, MockNotifier>,
}

fn fixture(store: MockAttemptStore, notifier_fails: bool) -> Fixture {
    let config = VerificationConfig::default();
    let store = Arc::new(store);
    let notifier = Arc::new(if notifier_fails {
        MockNotifier::new(true)
    } else {
        MockNotifier::tracking(store.clone())
    });
    let engine = Arc::new(LockoutEngine::new(store.clone(), notifier.clone(), &config));
    let runner = BulkOperationRunner::new(engine.clone(), &config);
    Fixture {
        store,
        notifier,
        engine,
        runner,
    }
}

#[tokio::test]
async fn test_bulk_unlock_partial_failure() {
    let f = fixture(
        MockAttemptStore::new()
            .with_record(1, Some("tok"), Some("5"))
            .with_record(3, Some("tok"), Some("2")),
        false,
    );

    let summary = f
        .runner
        .run(&MockAuthorizer::admin(), BulkAction::Unlock, &ids(&[1, 2, 3]))
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.failed(), 1);
    for id in [1, 3] {
        let status = f.engine.status(AccountId::new(id)).await.unwrap();
        assert_eq!(status.status, VerificationStatus::Verified);
        assert_eq!(status.attempts, 0);
    }
}

#[tokio::test]
async fn test_bulk_unauthorized_makes_no_changes() {
    let f = fixture(MockAttemptStore::new().with_record(1, Some("tok"), Some("5")), false);

    for action in [BulkAction::Unlock, BulkAction::Resend] {
        match f.runner.run(&MockAuthorizer::nobody(), action, &ids(&[1])).await {
            Err(DomainError::Unauthorized { capability }) => assert_eq!(capability, "edit_users"),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }
    assert!(f.store.writes().is_empty());
    assert!(f.notifier.sent_to().is_empty());
}

#[tokio::test]
async fn test_dispatch_passes_through_unknown_action() {
    let f = fixture(MockAttemptStore::new().with_record(1, Some("tok"), None), false);

    // Even an unauthorized actor gets a pass-through for foreign actions
    let result = f
        .runner
        .dispatch(&MockAuthorizer::nobody(), "delete", &ids(&[1]))
        .await
        .unwrap();
    assert_eq!(result, BulkDispatch::PassThrough);
    assert!(f.store.writes().is_empty());
}

#[tokio::test]
async fn test_dispatch_handles_registered_names() {
    let f = fixture(MockAttemptStore::new().with_record(1, Some("tok"), None), false);

    match f
        .runner
        .dispatch(&MockAuthorizer::admin(), "verify_resend", &ids(&[1]))
        .await
        .unwrap()
    {
        BulkDispatch::Handled(summary) => {
            assert_eq!(summary.action, BulkAction::Resend);
            assert_eq!(summary.succeeded, 1);
        }
        BulkDispatch::PassThrough => panic!("verify_resend must be handled"),
    }
    assert_eq!(f.store.raw(1, ATTEMPTS_KEY).as_deref(), Some("1"));
}

#[tokio::test]
async fn test_bulk_resend_counts_verified_as_success() {
    let f = fixture(
        MockAttemptStore::new()
            .with_record(1, Some("unlocked"), None)
            .with_record(2, Some("tok"), Some("1")),
        false,
    );

    let summary = f
        .runner
        .run(&MockAuthorizer::admin(), BulkAction::Resend, &ids(&[1, 2]))
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(f.notifier.sent_to(), vec![AccountId::new(2)]);
    assert_eq!(f.store.raw(2, ATTEMPTS_KEY).as_deref(), Some("2"));
}

#[tokio::test]
async fn test_bulk_resend_notifier_failures_continue() {
    let f = fixture(
        MockAttemptStore::new()
            .with_record(1, Some("tok"), None)
            .with_record(2, Some("tok"), None),
        true,
    );

    let summary = f
        .runner
        .run(&MockAuthorizer::admin(), BulkAction::Resend, &ids(&[1, 2]))
        .await
        .unwrap();
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.attempted, 2);
}

#[tokio::test]
async fn test_bulk_aborts_on_store_outage() {
    let f = fixture(
        MockAttemptStore::new()
            .with_record(1, Some("tok"), None)
            .with_record(2, Some("tok"), None)
            .with_record(3, Some("tok"), None),
        false,
    );
    // First unlock writes two entries, the second account fails mid-way
    f.store.fail_after_writes(3);

    let result = f
        .runner
        .run(&MockAuthorizer::admin(), BulkAction::Unlock, &ids(&[1, 2, 3]))
        .await;

    assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
    assert_eq!(f.store.raw(3, "verify-lock").as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_bulk_resend_aborts_when_attempt_increment_fails() {
    let f = fixture(
        MockAttemptStore::new()
            .with_record(1, Some("tok"), Some("0"))
            .with_record(2, Some("tok"), Some("0")),
        false,
    );
    f.store.fail_after_writes(0);

    let result = f
        .runner
        .run(&MockAuthorizer::admin(), BulkAction::Resend, &ids(&[1, 2]))
        .await;

    assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
    assert!(f.notifier.sent_to().is_empty());
}

#[tokio::test]
async fn test_bulk_empty_list() {
    let f = fixture(MockAttemptStore::new(), false);
    let summary = f
        .runner
        .run(&MockAuthorizer::admin(), BulkAction::Unlock, &[])
        .await
        .unwrap();
    assert_eq!(summary.attempted, 0);
    assert_eq!(summary.succeeded, 0);
}
