//! End-to-end flows through the verification engine with in-process stores

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use av_core::domain::{AccountId, QuickAction, StatusFilter, VerificationStatus, ATTEMPTS_KEY};
    use av_core::errors::DomainResult;
    use av_core::repositories::{AttemptStore, MockActionTokenStore, MockAttemptStore};
    use av_core::services::verification::{
        AggregateCounter, Authorizer, BulkDispatch, BulkOperationRunner, LockoutEngine, Notifier,
        QuickActionNotice, QuickActionService, VerificationConfig,
    };

    // Delivery stand-in that owns the attempt increment
    struct CountingMailer {
        store: Arc<MockAttemptStore>,
        delivered: Mutex<Vec<AccountId>>,
    }

    #[async_trait]
    impl Notifier for CountingMailer {
        async fn send_verification(&self, account_id: AccountId) -> DomainResult<()> {
            self.store.increment_field(account_id, ATTEMPTS_KEY).await?;
            self.delivered.lock().unwrap().push(account_id);
            Ok(())
        }
    }

    struct Admin;

    impl Authorizer for Admin {
        fn can(&self, capability: &str) -> bool {
            capability == "edit_users"
        }
    }

    struct Harness {
        store: Arc<MockAttemptStore>,
        mailer: Arc<CountingMailer>,
        engine: Arc<LockoutEngine<MockAttemptStore, CountingMailer>>,
        counter: AggregateCounter<MockAttemptStore>,
        bulk: BulkOperationRunner<MockAttemptStore, CountingMailer>,
        quick: QuickActionService<MockAttemptStore, CountingMailer, MockActionTokenStore>,
    }

    fn harness(store: MockAttemptStore) -> Harness {
        let config = VerificationConfig::default();
        let store = Arc::new(store);
        let mailer = Arc::new(CountingMailer {
            store: store.clone(),
            delivered: Mutex::new(Vec::new()),
        });
        let engine = Arc::new(LockoutEngine::new(store.clone(), mailer.clone(), &config));
        Harness {
            counter: AggregateCounter::new(store.clone(), &config),
            bulk: BulkOperationRunner::new(engine.clone(), &config),
            quick: QuickActionService::new(
                engine.clone(),
                Arc::new(MockActionTokenStore::new()),
                &config,
            ),
            store,
            mailer,
            engine,
        }
    }

    #[tokio::test]
    async fn test_resend_until_locked_out_then_unlock() {
        let h = harness(MockAttemptStore::new().with_record(10, Some("signup-token"), None));
        let id = AccountId::new(10);

        for _ in 0..5 {
            h.engine.resend(id).await.unwrap();
        }
        assert_eq!(h.engine.status(id).await.unwrap().status, VerificationStatus::LockedOut);
        assert_eq!(h.counter.count_locked_out().await.unwrap(), 1);

        let dispatched = h
            .bulk
            .dispatch(&Admin, "verify_unlock", &[id])
            .await
            .unwrap();
        assert!(matches!(dispatched, BulkDispatch::Handled(s) if s.succeeded == 1));

        let summary = h.engine.status(id).await.unwrap();
        assert_eq!(summary.status, VerificationStatus::Verified);
        assert_eq!(summary.attempts, 0);
        assert_eq!(h.counter.count_locked_out().await.unwrap(), 0);
        assert_eq!(h.counter.count(StatusFilter::Verified).await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_resends_are_all_counted() {
        let h = Arc::new(harness(MockAttemptStore::new().with_record(20, Some("tok"), None)));
        let id = AccountId::new(20);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let h = h.clone();
            handles.push(tokio::spawn(async move { h.engine.resend(id).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(h.mailer.delivered.lock().unwrap().len(), 16);
        assert_eq!(h.store.raw(20, ATTEMPTS_KEY).as_deref(), Some("16"));
    }

    #[tokio::test]
    async fn test_quick_action_round_trip() {
        let h = harness(MockAttemptStore::new().with_record(30, Some("tok"), Some("2")));
        let id = AccountId::new(30);

        let actions = h.quick.available_actions(&Admin, id).await.unwrap();
        assert_eq!(actions, vec![QuickAction::Unlock, QuickAction::Resend]);

        let token = h.quick.issue_token(&Admin, id, QuickAction::Resend).await.unwrap();
        let outcome = h
            .quick
            .execute(&Admin, id, QuickAction::Resend, &token.token)
            .await
            .unwrap();
        assert_eq!(outcome.notice, QuickActionNotice::Resent);
        assert_eq!(h.engine.status(id).await.unwrap().attempts, 3);
    }

    #[tokio::test]
    async fn test_counts_cover_accounts_without_metadata() {
        let h = harness(
            MockAttemptStore::new()
                .with_account(1)
                .with_account(2)
                .with_record(3, Some("tok"), Some("1")),
        );

        let verified = h.counter.count(StatusFilter::Verified).await.unwrap();
        let unverified = h.counter.count(StatusFilter::Unverified).await.unwrap();
        assert_eq!(verified + unverified, 3);
        assert_eq!(unverified, 1);
    }
}
