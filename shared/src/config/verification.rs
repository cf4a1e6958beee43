//! Verification engine configuration

use serde::{Deserialize, Serialize};

/// Default ceiling on verification resend attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Capability an actor must hold to manage account verification
pub const DEFAULT_REQUIRED_CAPABILITY: &str = "edit_users";

/// Default lifetime of a quick action token (24 hours)
pub const DEFAULT_ACTION_TOKEN_TTL_SECONDS: u64 = 86_400;

/// Longest accepted quick action token lifetime (30 days)
pub const MAX_ACTION_TOKEN_TTL_SECONDS: u64 = 2_592_000;

/// Rules shared by every verification component
///
/// The value is handed to each service at construction time; nothing reads
/// these settings from process-wide state afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Attempt count at which a locked account is reported as locked out
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Capability checked before any mutating or bulk operation
    #[serde(default = "default_required_capability")]
    pub required_capability: String,

    /// Lifetime of single-use quick action tokens in seconds
    #[serde(default = "default_action_token_ttl")]
    pub action_token_ttl_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            required_capability: default_required_capability(),
            action_token_ttl_seconds: DEFAULT_ACTION_TOKEN_TTL_SECONDS,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let max_attempts = std::env::var("VERIFY_MAX_RESEND_ALLOWED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        let required_capability = std::env::var("VERIFY_REQUIRED_CAPABILITY")
            .unwrap_or_else(|_| default_required_capability());
        let action_token_ttl_seconds = std::env::var("VERIFY_ACTION_TOKEN_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ACTION_TOKEN_TTL_SECONDS);

        Self {
            required_capability,
            ..Default::default()
        }
        .with_max_attempts(max_attempts)
        .with_action_token_ttl(action_token_ttl_seconds)
    }

    /// Set the attempt ceiling; values below 1 are raised to 1
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the capability required for admin operations
    pub fn with_required_capability(mut self, capability: impl Into<String>) -> Self {
        self.required_capability = capability.into();
        self
    }

    /// Set the quick action token lifetime, clamped to `1..=MAX_ACTION_TOKEN_TTL_SECONDS`
    pub fn with_action_token_ttl(mut self, seconds: u64) -> Self {
        self.action_token_ttl_seconds = seconds.clamp(1, MAX_ACTION_TOKEN_TTL_SECONDS);
        self
    }

    /// Token lifetime to use; deserialized values are not clamped on load
    pub fn action_token_ttl(&self) -> u64 {
        self.action_token_ttl_seconds.clamp(1, MAX_ACTION_TOKEN_TTL_SECONDS)
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_required_capability() -> String {
    String::from(DEFAULT_REQUIRED_CAPABILITY)
}

fn default_action_token_ttl() -> u64 {
    DEFAULT_ACTION_TOKEN_TTL_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.required_capability, "edit_users");
        assert_eq!(config.action_token_ttl_seconds, 86_400);
    }

    #[test]
    fn test_max_attempts_is_at_least_one() {
        let config = VerificationConfig::default().with_max_attempts(0);
        assert_eq!(config.max_attempts, 1);

        let config = VerificationConfig::default().with_max_attempts(7);
        assert_eq!(config.max_attempts, 7);
    }

    #[test]
    fn test_action_token_ttl_is_bounded() {
        let config = VerificationConfig::default().with_action_token_ttl(u64::MAX);
        assert_eq!(config.action_token_ttl_seconds, MAX_ACTION_TOKEN_TTL_SECONDS);

        let config = VerificationConfig::default().with_action_token_ttl(0);
        assert_eq!(config.action_token_ttl(), 1);

        let config: VerificationConfig =
            serde_json::from_str(r#"{"action_token_ttl_seconds": 18446744073709551615}"#).unwrap();
        assert_eq!(config.action_token_ttl(), MAX_ACTION_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let config: VerificationConfig = serde_json::from_str(r#"{"max_attempts": 3}"#).unwrap();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.required_capability, DEFAULT_REQUIRED_CAPABILITY);
        assert_eq!(config.action_token_ttl_seconds, DEFAULT_ACTION_TOKEN_TTL_SECONDS);
    }
}
