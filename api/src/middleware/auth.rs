//! JWT authentication middleware for the admin API.
//!
//! Tokens are issued by the host platform's identity service. This middleware
//! only verifies the HS256 signature and expiry, then injects an
//! [`AuthContext`] carrying the actor's capabilities into the request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use av_core::services::verification::Authorizer;
use av_shared::AuthConfig;
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::ApiError;

/// Claims read from an admin access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Actor identifier
    pub sub: String,
    /// Capabilities granted to the actor
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Expiry (seconds since the epoch)
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Authenticated actor injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject: String,
    pub capabilities: Vec<String>,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            capabilities: claims.capabilities,
        }
    }
}

impl Authorizer for AuthContext {
    fn can(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Verification settings shared by every worker's middleware instance
struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        match &config.issuer {
            Some(issuer) => {
                validation.set_required_spec_claims(&["exp", "sub", "iss"]);
                validation.set_issuer(&[issuer]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub"]),
        }

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    fn verify(&self, token: &str) -> Result<AuthContext, ApiError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| AuthContext::from_claims(data.claims))
            .map_err(|e| ApiError::Unauthenticated(format!("Token verification failed: {}", e)))
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<JwtVerifier>,
}

impl JwtAuth {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            verifier: Arc::new(JwtVerifier::new(config)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<JwtVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let context = match extract_bearer_token(&req) {
                Some(token) => verifier.verify(&token),
                None => Err(ApiError::Unauthenticated(
                    "Missing or invalid Authorization header".to_string(),
                )),
            };

            match context {
                Ok(context) => {
                    tracing::debug!(subject = %context.subject, path = %req.path(), "Authenticated admin request");
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    tracing::debug!(path = %req.path(), error = %e, "Rejected admin request");
                    let response = e.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated("Authentication required".to_string()).into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(secret: &str, capabilities: &[&str], exp: u64) -> String {
        let claims = Claims {
            sub: "admin-7".to_string(),
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
            exp,
            iss: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> u64 {
        (chrono::Utc::now().timestamp() + 3600) as u64
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = actix_test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_verify_reads_capabilities() {
        let verifier = JwtVerifier::new(&AuthConfig::new("secret"));
        let token = token_for("secret", &["edit_users", "list_users"], far_future());

        let context = verifier.verify(&token).unwrap();
        assert_eq!(context.subject, "admin-7");
        assert!(context.can("edit_users"));
        assert!(!context.can("delete_users"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret_and_expired() {
        let verifier = JwtVerifier::new(&AuthConfig::new("secret"));

        let forged = token_for("other", &["edit_users"], far_future());
        assert!(verifier.verify(&forged).is_err());

        let expired = token_for("secret", &["edit_users"], 1_000);
        assert!(verifier.verify(&expired).is_err());
    }

    #[test]
    fn test_issuer_enforced_when_configured() {
        let mut config = AuthConfig::new("secret");
        config.issuer = Some("identity".to_string());
        let verifier = JwtVerifier::new(&config);

        let token = token_for("secret", &["edit_users"], far_future());
        assert!(verifier.verify(&token).is_err());
    }
}
