//! Database layer for khreact
//!
//! Provides:
//! - SeaORM row models
//! - Point repository over any connection or transaction
//! - Connection pool management
//! - Explicit schema creation

pub mod models;
mod repository;
pub mod schema;

pub use repository::PointRepository;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction,
    TransactionTrait,
};
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database...");

        let mut opts = ConnectOptions::new(&config.url);
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(true);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e),
            })?;

        let pool = Self { conn };

        if config.auto_migrate {
            schema::apply(&pool.conn).await?;
        }

        info!("Database connection established");

        Ok(pool)
    }

    /// Get the pooled connection
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Start a transaction; it rolls back when dropped uncommitted
    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        self.conn.begin().await.map_err(Into::into)
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }
}
