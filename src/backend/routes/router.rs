/**
 * Router Configuration
 *
 * Combines the API routes with the shared layers. From the outside in, a
 * request passes CORS, request logging, and panic recovery before reaching
 * a handler. Unmatched paths get the JSON not-found envelope.
 */

use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::backend::error::{handle_panic, not_found};
use crate::backend::middleware::log_requests;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new()).with_state(app_state);
    apply_layers(router)
}

/// Add the fallback and the shared layers to a fully-stated router
pub fn apply_layers(router: Router<()>) -> Router<()> {
    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
}
