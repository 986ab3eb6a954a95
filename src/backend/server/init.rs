/**
 * Server Initialization
 *
 * Builds the Axum application from a store and the validated configuration.
 * The store is passed in rather than created here so tests can serve the
 * same router over [`MemoryStore`](crate::backend::store::MemoryStore).
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::PasswordHasher;
use crate::backend::routes::create_router;
use crate::backend::server::state::AppState;
use crate::backend::store::BlogStore;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `store` - persistence shared by every service
/// * `config` - supplies the bcrypt cost
pub fn create_app<S: BlogStore>(store: Arc<S>, config: &AppConfig) -> Router<()> {
    tracing::info!(bcrypt_cost = config.bcrypt_cost, "Initializing blog API");

    let app_state = AppState::new(store, PasswordHasher::new(config.bcrypt_cost));
    let app = create_router(app_state);

    tracing::info!("Router configured");
    app
}
