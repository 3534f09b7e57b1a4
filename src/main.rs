use canasta_backend::config::Config;
use canasta_backend::services::{memory_store::InMemoryStore, sea_orm_store::SeaOrmStore};
use canasta_backend::AppState;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,canasta_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let state = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url.as_str()).await?;

            tracing::info!("Running migrations...");
            migration::Migrator::up(&db, None).await?;

            let store = Arc::new(SeaOrmStore::new(db));
            AppState::new(store.clone(), store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, data is kept in memory only");
            let store = Arc::new(InMemoryStore::new());
            AppState::new(store.clone(), store)
        }
    };

    let app = canasta_backend::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
