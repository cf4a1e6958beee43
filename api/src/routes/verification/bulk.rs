use actix_web::{web, HttpResponse};
use validator::Validate;

use av_core::repositories::{ActionTokenStore, AttemptStore};
use av_core::services::verification::Notifier;

use crate::app::AppState;
use crate::dto::{BulkActionRequest, BulkActionResponse};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/admin/verification/bulk
///
/// # Request Body
///
/// ```json
/// {
///     "action": "verify_unlock",
///     "account_ids": [3, 17, 42]
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "handled": true, "action": "verify_unlock", "succeeded": 2, "attempted": 3 }
/// ```
///
/// Action names other than `verify_unlock` and `verify_resend` are left for
/// other handlers and answer `{ "handled": false }`.
///
/// ## Errors
/// - 400 Bad Request: Malformed body
/// - 403 Forbidden: Caller lacks the required capability
/// - 503 Service Unavailable: Account store failed mid-run
pub async fn bulk_action<S, N, T>(
    state: web::Data<AppState<S, N, T>>,
    request: web::Json<BulkActionRequest>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    S: AttemptStore + 'static,
    N: Notifier + 'static,
    T: ActionTokenStore + 'static,
{
    request.validate()?;

    let dispatch = state
        .bulk
        .dispatch(&auth, &request.action, &request.account_ids)
        .await?;

    Ok(HttpResponse::Ok().json(BulkActionResponse::from(dispatch)))
}
