use actix_web::{web, HttpResponse};

use av_core::domain::entities::AccountId;
use av_core::repositories::{ActionTokenStore, AttemptStore};
use av_core::services::verification::Notifier;
use av_shared::PaginatedResponse;

use crate::app::AppState;
use crate::dto::{AccountDetailResponse, AccountListQuery, AccountListResponse};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/admin/verification/accounts
///
/// `status` is one of `verified`, `unverified` (default, includes locked-out
/// accounts) or `locked`. `page` is 1-based; `per_page` is clamped to 1..=200.
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "locked",
///     "data": [3, 17],
///     "page": 1,
///     "per_page": 20,
///     "total": 2,
///     "total_pages": 1
/// }
/// ```
pub async fn list_accounts<S, N, T>(
    state: web::Data<AppState<S, N, T>>,
    query: web::Query<AccountListQuery>,
    _auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    S: AttemptStore + 'static,
    N: Notifier + 'static,
    T: ActionTokenStore + 'static,
{
    let filter = query.filter();
    let pagination = query.pagination();

    let total = state.counter.count(filter).await?;
    let ids = state.counter.list(filter, pagination).await?;

    Ok(HttpResponse::Ok().json(AccountListResponse {
        status: filter,
        accounts: PaginatedResponse::new(ids, pagination, total),
    }))
}

/// Handler for GET /api/v1/admin/verification/accounts/{id}
///
/// Returns the classified status, the status column label and the quick
/// actions the caller may run on this account.
///
/// ## Errors
/// - 404 Not Found: No such account
pub async fn account_detail<S, N, T>(
    state: web::Data<AppState<S, N, T>>,
    path: web::Path<u64>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    S: AttemptStore + 'static,
    N: Notifier + 'static,
    T: ActionTokenStore + 'static,
{
    let account_id = AccountId::new(path.into_inner());

    let summary = state.engine.status(account_id).await?;
    let available_actions = state
        .quick_actions
        .available_actions(&auth, account_id)
        .await?;

    Ok(HttpResponse::Ok().json(AccountDetailResponse {
        account_id,
        label: summary.label(),
        summary,
        available_actions,
    }))
}
