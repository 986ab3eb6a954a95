/**
 * PostgreSQL Store
 *
 * Owns the sqlx connection pool. Construction connects, `migrate` applies the
 * embedded migrations from `migrations/`, and `close` drains the pool on
 * shutdown. Repository impls for this type live in each entity's `db` module.
 */

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::shared::config::AppConfig;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a connection pool sized from the configuration
    pub async fn connect(config: &AppConfig) -> Result<Self, sqlx::Error> {
        tracing::info!(max_connections = config.max_connections, "Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        tracing::info!("Database connection pool created successfully");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!().run(&self.pool).await?;
        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Remove every row from every table
    pub async fn truncate_all(&self) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE comments, article_tags, articles, tags, users CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}
