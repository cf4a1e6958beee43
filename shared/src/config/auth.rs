//! Admin API authentication configuration

use serde::{Deserialize, Serialize};

/// JWT verification settings for the admin API
///
/// Tokens are minted by the host platform's identity service; this service
/// only verifies them and reads the capability list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Shared HS256 secret
    pub jwt_secret: String,

    /// Expected issuer claim, if any
    #[serde(default)]
    pub issuer: Option<String>,

    /// Allowed clock skew in seconds when checking expiry
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("change-me-in-production"),
            issuer: None,
            leeway_seconds: default_leeway(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| Self::default().jwt_secret),
            issuer: std::env::var("JWT_ISSUER").ok(),
            ..Default::default()
        }
    }

    /// Create a configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }
}

fn default_leeway() -> u64 {
    30
}
