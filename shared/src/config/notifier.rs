//! Verification email delivery configuration

use serde::{Deserialize, Serialize};

/// Delivery backend for verification emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierProvider {
    /// Log the send and record it in memory
    Mock,
    /// Post to a transactional mail HTTP endpoint
    Http,
}

impl std::str::FromStr for NotifierProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(NotifierProvider::Mock),
            "http" => Ok(NotifierProvider::Http),
            _ => Err(format!("Invalid notifier provider: {}", s)),
        }
    }
}

/// Notifier configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// Which backend delivers verification emails
    pub provider: NotifierProvider,

    /// Mail API endpoint (http provider only)
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token for the mail API
    #[serde(default)]
    pub api_key: String,

    /// Sender address placed on verification emails
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            provider: NotifierProvider::Mock,
            endpoint: String::new(),
            api_key: String::new(),
            from_address: default_from_address(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl NotifierConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let provider = std::env::var("NOTIFIER_PROVIDER")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(NotifierProvider::Mock);

        Self {
            provider,
            endpoint: std::env::var("NOTIFIER_ENDPOINT").unwrap_or_default(),
            api_key: std::env::var("NOTIFIER_API_KEY").unwrap_or_default(),
            from_address: std::env::var("NOTIFIER_FROM_ADDRESS")
                .unwrap_or_else(|_| default_from_address()),
            ..Default::default()
        }
    }
}

fn default_from_address() -> String {
    String::from("no-reply@localhost")
}

fn default_timeout() -> u64 {
    10
}
