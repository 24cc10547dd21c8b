//! Database service layer
//!
//! This module selects the session store backend from configuration

use std::sync::Arc;
use tracing::info;
use crate::config::{Settings, StoreBackend};
use crate::database::{create_pool, run_migrations, health_check, DatabasePool, InMemorySessionStore, SessionRepository, SessionStore};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct DatabaseService {
    pub sessions: Arc<dyn SessionStore>,
    pool: Option<DatabasePool>,
}

impl DatabaseService {
    /// Service backed by PostgreSQL
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            sessions: Arc::new(SessionRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Service backed by the in-process store
    pub fn in_memory() -> Self {
        Self {
            sessions: Arc::new(InMemorySessionStore::new()),
            pool: None,
        }
    }

    /// Connect according to `database.backend`, running migrations for PostgreSQL
    pub async fn connect(settings: &Settings) -> Result<Self> {
        match settings.database.backend {
            StoreBackend::Memory => {
                info!("Using in-memory session store");
                Ok(Self::in_memory())
            }
            StoreBackend::Postgres => {
                info!("Connecting to database...");
                let db_config = crate::database::DatabaseConfig::from(&settings.database);
                let pool = create_pool(&db_config).await?;
                run_migrations(&pool).await?;
                Ok(Self::new(pool))
            }
        }
    }

    /// Check the backing database, if any
    pub async fn health_check(&self) -> Result<()> {
        match &self.pool {
            Some(pool) => health_check(pool).await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for DatabaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseService")
            .field("postgres", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}
