use std::sync::Arc;

use auth::AccessGuard;
use auth::Authenticator;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::config::StorageBackend;
use todo_service::domain::identity::ports::IdentityServicePort;
use todo_service::domain::identity::service::IdentityService;
use todo_service::domain::todo::ports::TodoServicePort;
use todo_service::domain::todo::service::TodoService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::repositories::InMemoryStore;
use todo_service::outbound::repositories::PostgresIdentityRepository;
use todo_service::outbound::repositories::PostgresTodoRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        jwt_algorithm = %config.jwt.algorithm,
        token_lifetime_minutes = config.jwt.token_lifetime_minutes,
        "Configuration loaded"
    );

    let token_lifetime = Duration::try_minutes(config.jwt.token_lifetime_minutes)
        .ok_or_else(|| anyhow::anyhow!("jwt.token_lifetime_minutes is out of range"))?;
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.algorithm,
        token_lifetime,
    ));
    let access_guard = Arc::new(AccessGuard::new(Arc::clone(&authenticator)));

    let (identity_service, todo_service): (Arc<dyn IdentityServicePort>, Arc<dyn TodoServicePort>) =
        match config.storage.backend {
            StorageBackend::Postgres => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(&config.database.url)
                    .await?;
                tracing::info!(
                    max_connections = config.database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
                let todo_repository = Arc::new(PostgresTodoRepository::new(pg_pool));

                (
                    Arc::new(IdentityService::new(
                        identity_repository,
                        Arc::clone(&authenticator),
                    )),
                    Arc::new(TodoService::new(todo_repository)),
                )
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                let store = Arc::new(InMemoryStore::new());

                (
                    Arc::new(IdentityService::new(
                        Arc::clone(&store),
                        Arc::clone(&authenticator),
                    )),
                    Arc::new(TodoService::new(store)),
                )
            }
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(identity_service, todo_service, access_guard);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
