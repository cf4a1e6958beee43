//! Application state and factory
//!
//! This module wires the verification services into shared state and builds
//! the Actix-web application around them.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use av_core::repositories::{ActionTokenStore, AttemptStore};
use av_core::services::verification::{
    AggregateCounter, BulkOperationRunner, LockoutEngine, Notifier, QuickActionService,
    VerificationConfig,
};
use av_shared::{error_codes, AppConfig, ErrorResponse};

use crate::handlers::ApiError;
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{health, verification};

/// Services shared by every worker
pub struct AppState<S, N, T>
where
    S: AttemptStore,
    N: Notifier,
    T: ActionTokenStore,
{
    pub engine: Arc<LockoutEngine<S, N>>,
    pub counter: AggregateCounter<S>,
    pub bulk: BulkOperationRunner<S, N>,
    pub quick_actions: QuickActionService<S, N, T>,
}

impl<S, N, T> AppState<S, N, T>
where
    S: AttemptStore,
    N: Notifier,
    T: ActionTokenStore,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, tokens: Arc<T>, config: &VerificationConfig) -> Self {
        let engine = Arc::new(LockoutEngine::new(Arc::clone(&store), notifier, config));

        Self {
            counter: AggregateCounter::new(store, config),
            bulk: BulkOperationRunner::new(Arc::clone(&engine), config),
            quick_actions: QuickActionService::new(Arc::clone(&engine), tokens, config),
            engine,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S, N, T>(
    app_state: web::Data<AppState<S, N, T>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: AttemptStore + 'static,
    N: Notifier + 'static,
    T: ActionTokenStore + 'static,
{
    let cors = create_cors(config.environment, &config.server);
    let auth = JwtAuth::new(&config.auth);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(|err, _| {
            ApiError::BadRequest(err.to_string()).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _| {
            ApiError::BadRequest(err.to_string()).into()
        }))
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1/admin/verification")
                .wrap(auth)
                .route("/stats", web::get().to(verification::stats::<S, N, T>))
                .route("/accounts", web::get().to(verification::list_accounts::<S, N, T>))
                .route("/accounts/{id}", web::get().to(verification::account_detail::<S, N, T>))
                .route(
                    "/accounts/{id}/action-tokens",
                    web::post().to(verification::issue_action_token::<S, N, T>),
                )
                .route("/accounts/{id}/unlock", web::post().to(verification::unlock::<S, N, T>))
                .route("/accounts/{id}/resend", web::post().to(verification::resend::<S, N, T>))
                .route("/bulk", web::post().to(verification::bulk_action::<S, N, T>)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
