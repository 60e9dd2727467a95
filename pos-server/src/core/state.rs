//! Shared server state

use std::sync::Arc;

use sqlx::SqlitePool;

use super::Config;
use crate::db;
use crate::printing::PrintService;

/// Cloneable state handed to every request handler.
#[derive(Clone)]
pub struct ServerState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub printing: Arc<PrintService>,
}

impl ServerState {
    /// Open the database, create the schema, wire up printing.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let pool = db::connect(&config.database_path).await?;
        db::init_schema(&pool).await?;

        let config = Arc::new(config.clone());
        let printing = Arc::new(PrintService::new(config.clone()));

        Ok(Self {
            pool,
            config,
            printing,
        })
    }

    /// State over an in-memory database, for tests.
    pub async fn in_memory(config: Config) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        db::init_schema(&pool).await?;

        let config = Arc::new(config);
        let printing = Arc::new(PrintService::new(config.clone()));

        Ok(Self {
            pool,
            config,
            printing,
        })
    }
}
