use actix_web::{web, HttpResponse};

use av_core::domain::entities::{AccountId, QuickAction};
use av_core::repositories::{ActionTokenStore, AttemptStore};
use av_core::services::verification::Notifier;

use crate::app::AppState;
use crate::dto::{ActionTokenRequest, QuickActionQuery};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/admin/verification/accounts/{id}/action-tokens
///
/// # Request Body
///
/// ```json
/// { "action": "unlock" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "token": "...", "account_id": 42, "action": "unlock", "expires_in": 86400 }
/// ```
///
/// The plain token is only returned here; it is stored as a digest.
pub async fn issue_action_token<S, N, T>(
    state: web::Data<AppState<S, N, T>>,
    path: web::Path<u64>,
    request: web::Json<ActionTokenRequest>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    S: AttemptStore + 'static,
    N: Notifier + 'static,
    T: ActionTokenStore + 'static,
{
    let account_id = AccountId::new(path.into_inner());
    let token = state
        .quick_actions
        .issue_token(&auth, account_id, request.action)
        .await?;

    Ok(HttpResponse::Created().json(token))
}

/// Handler for POST /api/v1/admin/verification/accounts/{id}/unlock?token=...
pub async fn unlock<S, N, T>(
    state: web::Data<AppState<S, N, T>>,
    path: web::Path<u64>,
    query: web::Query<QuickActionQuery>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    S: AttemptStore + 'static,
    N: Notifier + 'static,
    T: ActionTokenStore + 'static,
{
    run_quick_action(&state, path.into_inner(), QuickAction::Unlock, &query.token, &auth).await
}

/// Handler for POST /api/v1/admin/verification/accounts/{id}/resend?token=...
///
/// Answers `{"account_id": 42, "notice": "already_verified"}` without sending
/// anything when the account is verified.
pub async fn resend<S, N, T>(
    state: web::Data<AppState<S, N, T>>,
    path: web::Path<u64>,
    query: web::Query<QuickActionQuery>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    S: AttemptStore + 'static,
    N: Notifier + 'static,
    T: ActionTokenStore + 'static,
{
    run_quick_action(&state, path.into_inner(), QuickAction::Resend, &query.token, &auth).await
}

async fn run_quick_action<S, N, T>(
    state: &AppState<S, N, T>,
    account_id: u64,
    action: QuickAction,
    token: &str,
    auth: &AuthContext,
) -> Result<HttpResponse, ApiError>
where
    S: AttemptStore,
    N: Notifier,
    T: ActionTokenStore,
{
    let outcome = state
        .quick_actions
        .execute(auth, AccountId::new(account_id), action, token)
        .await?;

    tracing::info!(
        subject = %auth.subject,
        account_id = account_id,
        action = %action,
        "Quick action completed"
    );

    Ok(HttpResponse::Ok().json(outcome))
}
