use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use av_api::{config, create_app, telemetry, AppState};
use av_core::repositories::{ActionTokenStore, AttemptStore};
use av_infra::cache::{RedisActionTokenStore, RedisClient};
use av_infra::database::{DatabasePool, MySqlAttemptStore};
use av_infra::memory::{InMemoryActionTokenStore, InMemoryAttemptStore};
use av_infra::notify::{create_notifier, AttemptTrackingNotifier};
use av_shared::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        storage = ?config.storage,
        max_attempts = config.verification.max_attempts,
        "Starting account verification API"
    );

    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            serve(
                config,
                Arc::new(InMemoryAttemptStore::new()),
                Arc::new(InMemoryActionTokenStore::new()),
            )
            .await
        }
        StorageBackend::Persistent => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("Failed to connect to MySQL")?;
            pool.run_migrations()
                .await
                .context("Failed to run database migrations")?;
            let redis = RedisClient::new(config.cache.clone())
                .await
                .context("Failed to connect to Redis")?;

            serve(
                config,
                Arc::new(MySqlAttemptStore::new(pool.get_pool().clone())),
                Arc::new(RedisActionTokenStore::new(redis)),
            )
            .await
        }
    }
}

async fn serve<S, T>(config: AppConfig, store: Arc<S>, tokens: Arc<T>) -> anyhow::Result<()>
where
    S: AttemptStore + 'static,
    T: ActionTokenStore + 'static,
{
    let notifier = Arc::new(AttemptTrackingNotifier::new(
        Arc::clone(&store),
        create_notifier(&config.notifier),
    ));
    let state = web::Data::new(AppState::new(store, notifier, tokens, &config.verification));

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone(), &config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server terminated with an error")
}
