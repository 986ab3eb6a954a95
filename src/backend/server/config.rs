/**
 * Server Configuration
 *
 * Opens the PostgreSQL store described by [`AppConfig`] and brings its schema
 * up to date. Unlike the settings themselves, which are validated in
 * `shared::config`, failures here need a reachable database to show up.
 */

use crate::backend::store::PgStore;
use crate::shared::AppConfig;

/// Failures while bringing the server up
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("could not bind listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Connect to PostgreSQL and run pending migrations
///
/// Progress is logged by [`PgStore`] itself.
///
/// # Errors
///
/// * `StartupError::Database` - the pool could not be created
/// * `StartupError::Migration` - a migration failed to apply
pub async fn load_store(config: &AppConfig) -> Result<PgStore, StartupError> {
    let store = PgStore::connect(config).await?;
    store.migrate().await?;
    Ok(store)
}
