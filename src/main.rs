use library_catalog::{
    adapters::{
        memory::{MemoryBookStore, MemoryStockStore},
        postgres::{self, PostgresBookStore, PostgresStockStore},
        user_service::UserServiceClient,
    },
    api::{handlers::AppState, router::create_router, server::serve},
    application::ServiceDependencies,
    config::{AppConfig, StorageBackend},
    ports::{BookStore, StockStore},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize stores
    let (book_store, stock_store): (Arc<dyn BookStore>, Arc<dyn StockStore>) =
        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage");
                (
                    Arc::new(MemoryBookStore::new()) as Arc<dyn BookStore>,
                    Arc::new(MemoryStockStore::new()) as Arc<dyn StockStore>,
                )
            }
            StorageBackend::Postgres => {
                let database_url = config
                    .database
                    .url
                    .as_deref()
                    .ok_or("database.url (or DATABASE_URL) is required for postgres storage")?;
                let pool = postgres::connect(database_url, config.database.max_connections).await?;
                tracing::info!("Using PostgreSQL storage");
                (
                    Arc::new(PostgresBookStore::new(pool.clone())) as Arc<dyn BookStore>,
                    Arc::new(PostgresStockStore::new(pool)) as Arc<dyn StockStore>,
                )
            }
        };

    // Permission checks go to the user service
    let user_service_url = config.user_service.base_url();
    tracing::info!("User service: {}", user_service_url);
    let timeout = config.user_service.timeout();
    let permission_gate = Arc::new(UserServiceClient::new(user_service_url, timeout)?);

    let service_deps = ServiceDependencies {
        book_store,
        stock_store,
        permission_gate,
    };

    // Create router
    let app = create_router(Arc::new(AppState { service_deps }));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    let deadline = config.server.shutdown_timeout();
    serve(listener, app, shutdown_signal(), deadline).await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully");
}
