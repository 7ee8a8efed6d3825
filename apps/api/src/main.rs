use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use member_graph_api::config::{Config, StorageBackend};
use member_graph_api::graphql::SchemaBuilder;
use member_graph_api::repositories::{EntityRepository, MemoryRepository, PgRepository};
use member_graph_api::routes::build_router;

/// Connect the configured storage backend
async fn connect_repository(config: &Config) -> anyhow::Result<Arc<dyn EntityRepository>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory storage backend; data is lost on restart");
            Ok(Arc::new(MemoryRepository::new()))
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");

            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
                .connect(&config.database.url)
                .await
                .context("Failed to connect to the database")?;

            tracing::info!("Database connection established");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations completed successfully");

            Ok(Arc::new(PgRepository::new(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "member_graph_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment,
        storage = %config.storage,
        "Starting member graph API server on port {}",
        config.port
    );

    let repository = connect_repository(&config).await?;

    let schema = SchemaBuilder::new()
        .repository(repository)
        .config(&config.graphql)
        .build()
        .context("GraphQL schema requires a repository")?;
    tracing::info!(
        max_depth = config.graphql.max_depth,
        max_batch_size = ?config.graphql.max_batch_size,
        "GraphQL schema built"
    );

    let app = build_router(schema, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    if config.graphql.playground {
        tracing::info!(
            "GraphQL Playground available at http://{}:{}/graphql",
            addr.ip(),
            addr.port()
        );
    }

    axum::serve(listener, app).await?;

    Ok(())
}
