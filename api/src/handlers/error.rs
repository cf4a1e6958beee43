//! Mapping from domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use av_core::errors::DomainError;
use av_shared::{error_codes, ErrorResponse};

/// Error returned by every admin API handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Missing, malformed or expired bearer token
    #[error("{0}")]
    Unauthenticated(String),

    /// Request body or query failed validation before reaching the engine
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Domain(err) => err.code(),
            ApiError::Unauthenticated(_) => error_codes::UNAUTHORIZED,
            ApiError::BadRequest(_) => error_codes::VALIDATION_ERROR,
        }
    }

    /// Text shown to the client. Store and internal failures are not echoed.
    fn public_message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::StoreUnavailable { .. }) => {
                "Account store is temporarily unavailable".to_string()
            }
            ApiError::Domain(DomainError::Internal { .. }) => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                DomainError::AccountNotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                DomainError::InvalidActionToken => StatusCode::FORBIDDEN,
                DomainError::InvalidAction { .. } => StatusCode::BAD_REQUEST,
                DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
                DomainError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                DomainError::NotifierFailure { .. } => StatusCode::BAD_GATEWAY,
                DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut body = ErrorResponse::new(self.code(), self.public_message());
        if let ApiError::Domain(DomainError::AccountNotFound { account_id }) = self {
            body = body.add_detail("account_id", account_id);
        }

        HttpResponse::build(status).json(body)
    }
}
