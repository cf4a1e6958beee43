//! Verification email delivery through a transactional mail HTTP API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

use av_core::domain::AccountId;
use av_core::errors::{DomainError, DomainResult};
use av_core::services::verification::Notifier;
use av_shared::config::NotifierConfig;

use crate::InfrastructureError;

/// Template name the mail API renders for verification links
pub const VERIFICATION_TEMPLATE: &str = "account_verification";

/// Request body posted to the mail API
#[derive(Debug, Serialize)]
pub struct SendVerificationRequest<'a> {
    pub account_id: AccountId,
    pub from: &'a str,
    pub template: &'a str,
}

pub struct HttpEmailNotifier {
    client: Client,
    endpoint: String,
    api_key: String,
    from_address: String,
}

impl HttpEmailNotifier {
    /// Build the notifier; the endpoint must be set
    pub fn new(config: &NotifierConfig) -> Result<Self, InfrastructureError> {
        if config.endpoint.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "NOTIFIER_ENDPOINT not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        })
    }

    async fn post(&self, account_id: AccountId) -> Result<(), InfrastructureError> {
        let body = SendVerificationRequest {
            account_id,
            from: &self.from_address,
            template: VERIFICATION_TEMPLATE,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InfrastructureError::Notifier(format!(
                "Mail API responded with status {}",
                status
            )));
        }

        debug!(account_id = %account_id, status = %status, "Mail API accepted verification email");
        Ok(())
    }
}

#[async_trait]
impl Notifier for HttpEmailNotifier {
    async fn send_verification(&self, account_id: AccountId) -> DomainResult<()> {
        self.post(account_id).await.map_err(|e| {
            error!(account_id = %account_id, error = %e, "Verification email delivery failed");
            DomainError::NotifierFailure {
                message: e.to_string(),
            }
        })
    }
}
