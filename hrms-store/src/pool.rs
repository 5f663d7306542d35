//! Database connection pool

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::info;

use crate::StoreResult;

/// Shared handle to the database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Db(SqlitePool);

impl Db {
    /// Connect to `url`, creating the file if needed, and run migrations.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        info!(url, max_connections, "Connecting to database");

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        Self::migrate(pool).await
    }

    /// Private in-memory database, used by tests.
    ///
    /// Each SQLite memory connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> StoreResult<Self> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database initialized successfully");
        Ok(Self(pool))
    }

    /// Get the inner pool
    pub fn inner(&self) -> &SqlitePool {
        &self.0
    }

    /// Start a transaction. It rolls back when dropped without `commit`.
    pub async fn begin(&self) -> StoreResult<Transaction<'static, Sqlite>> {
        Ok(self.0.begin().await?)
    }

    /// Close the pool
    pub async fn close(&self) {
        self.0.close().await;
    }
}
