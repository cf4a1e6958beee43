//! Domain-specific error types and error handling.

use av_shared::error_codes;
use thiserror::Error;

use crate::domain::entities::AccountId;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Account not found: {account_id}")]
    AccountNotFound { account_id: AccountId },

    #[error("Actor lacks required capability: {capability}")]
    Unauthorized { capability: String },

    #[error("Unrecognized action: {action}")]
    InvalidAction { action: String },

    #[error("Attempt store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Verification delivery failed: {message}")]
    NotifierFailure { message: String },

    #[error("Action token is invalid, expired or already used")]
    InvalidActionToken,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Store outages abort a bulk run instead of counting as a per-account failure
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable { .. })
    }

    /// Stable machine-readable code, shared with the API error envelope
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::AccountNotFound { .. } => error_codes::ACCOUNT_NOT_FOUND,
            DomainError::Unauthorized { .. } => error_codes::FORBIDDEN,
            DomainError::InvalidAction { .. } => error_codes::INVALID_ACTION,
            DomainError::StoreUnavailable { .. } => error_codes::STORE_UNAVAILABLE,
            DomainError::NotifierFailure { .. } => error_codes::NOTIFIER_FAILURE,
            DomainError::InvalidActionToken => error_codes::INVALID_ACTION_TOKEN,
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DomainError::AccountNotFound { account_id: AccountId::new(42) };
        assert_eq!(err.to_string(), "Account not found: 42");

        let err = DomainError::Unauthorized { capability: "edit_users".to_string() };
        assert!(err.to_string().contains("edit_users"));
    }

    #[test]
    fn test_store_unavailable_detection() {
        assert!(DomainError::StoreUnavailable { message: "down".into() }.is_store_unavailable());
        assert!(!DomainError::InvalidActionToken.is_store_unavailable());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::InvalidActionToken.code(), "INVALID_ACTION_TOKEN");
        assert_eq!(
            DomainError::InvalidAction { action: "delete".into() }.code(),
            "INVALID_ACTION"
        );
    }
}
