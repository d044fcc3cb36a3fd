//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::PostRepository;
use blog_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use blog_infra::{DatabaseConfig, DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the state around an explicit gateway.
    pub fn with_repository(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostService::new(repo),
        }
    }

    /// Build the application state with the gateway the configuration selects.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let repo: Arc<dyn PostRepository> = match config.database.as_ref() {
            Some(db_config) => match connect_postgres(db_config, config.auto_migrate).await {
                Ok(repo) => repo,
                Err(e) => {
                    tracing::error!(
                        "Database unavailable: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostRepository::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repo: Arc<dyn PostRepository> = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");

        Self::with_repository(repo)
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(
    config: &DatabaseConfig,
    auto_migrate: bool,
) -> Result<Arc<dyn PostRepository>, migration::DbErr> {
    let connections = DatabaseConnections::init(config).await?;
    postgres_gateway(connections, auto_migrate).await
}

/// Wrap an open pool in the Postgres gateway.
///
/// A failed migration is an error: serving from a schema that may not match
/// the entity would fail every request.
#[cfg(feature = "postgres")]
async fn postgres_gateway(
    connections: DatabaseConnections,
    auto_migrate: bool,
) -> Result<Arc<dyn PostRepository>, migration::DbErr> {
    use migration::{Migrator, MigratorTrait};

    if auto_migrate {
        Migrator::up(&connections.main, None).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresPostRepository::new(connections.main)))
}
