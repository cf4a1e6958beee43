use actix_web::{web, HttpResponse};

use av_core::repositories::{ActionTokenStore, AttemptStore};
use av_core::services::verification::Notifier;

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/admin/verification/stats
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "total": 120,
///     "verified": 90,
///     "unverified": 30,
///     "locked_out": 4,
///     "verification_rate": 75.0
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 503 Service Unavailable: Account store unreachable
pub async fn stats<S, N, T>(
    state: web::Data<AppState<S, N, T>>,
    _auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    S: AttemptStore + 'static,
    N: Notifier + 'static,
    T: ActionTokenStore + 'static,
{
    let stats = state.counter.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}
