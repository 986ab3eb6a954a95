/**
 * Request Logging Middleware
 *
 * Logs one line per request as `METHOD path - status (Nms)`. The level
 * follows the status: `info` below 400, `warn` for client errors, `error`
 * for server errors.
 */

use std::time::Instant;

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    let level = level_for(status);
    if level == tracing::Level::ERROR {
        tracing::error!("{method} {path} - {} ({elapsed_ms}ms)", status.as_u16());
    } else if level == tracing::Level::WARN {
        tracing::warn!("{method} {path} - {} ({elapsed_ms}ms)", status.as_u16());
    } else {
        tracing::info!("{method} {path} - {} ({elapsed_ms}ms)", status.as_u16());
    }

    response
}

fn level_for(status: StatusCode) -> tracing::Level {
    if status.is_server_error() {
        tracing::Level::ERROR
    } else if status.is_client_error() {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    }
}
