//! Application state - shared across all handlers.

use std::fmt;
use std::sync::Arc;

use scribe_core::ports::{PostRepository, TokenService};
use scribe_core::{ManagerConfig, PostManager};
use scribe_infra::{InMemoryPostRepository, JwtTokenService};

use crate::config::AppConfig;

/// Which post store backs the running server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    InMemory,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Postgres => write!(f, "postgres"),
            StoreKind::InMemory => write!(f, "in-memory"),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostManager,
    pub tokens: Arc<dyn TokenService>,
    pub store: StoreKind,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let (repo, store) = Self::post_repository(config).await;

        tracing::info!(
            store = %store,
            access_policy = %config.posts.access_policy,
            max_limit = config.posts.max_limit,
            "Application state initialized"
        );

        Self::with_repository(repo, store, config.posts.clone(), tokens)
    }

    pub fn with_repository(
        repo: Arc<dyn PostRepository>,
        store: StoreKind,
        posts: ManagerConfig,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            posts: PostManager::new(repo, posts),
            tokens,
            store,
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> (Arc<dyn PostRepository>, StoreKind) {
        use scribe_infra::database::{DatabaseConfig, connect};
        use scribe_infra::PostgresPostRepository;

        let Some(settings) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryPostRepository::new()), StoreKind::InMemory);
        };

        let db_config = DatabaseConfig {
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            ..DatabaseConfig::new(settings.url.clone())
        };

        match connect(&db_config).await {
            Ok(conn) => (
                Arc::new(PostgresPostRepository::new(conn)),
                StoreKind::Postgres,
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (Arc::new(InMemoryPostRepository::new()), StoreKind::InMemory)
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(config: &AppConfig) -> (Arc<dyn PostRepository>, StoreKind) {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        (Arc::new(InMemoryPostRepository::new()), StoreKind::InMemory)
    }
}
