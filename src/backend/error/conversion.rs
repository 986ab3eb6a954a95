/**
 * Error Conversion
 *
 * The rendering boundary. This is the only place where a failure is turned
 * into an HTTP response:
 *
 * - `ApiResult<T>` renders as its JSON envelope with the HTTP status equal to
 *   its `statusCode`.
 * - `BackendError` is logged, converted with `BackendError::to_result`, and
 *   rendered the same way.
 * - axum extractor rejections convert into `BackendError::Rejection`.
 * - Handler panics caught by `CatchPanicLayer` go through [`handle_panic`].
 */

use std::any::Any;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::error::types::BackendError;
use crate::shared::error::ErrorKind;
use crate::shared::result::ApiResult;

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::warn!(kind = %self.kind(), "Request rejected: {}", self);
        } else {
            tracing::error!(kind = %self.kind(), error = ?self, "Unhandled error: {}", self);
        }

        self.to_result::<()>().into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejection(format!("Corpo da requisição inválido: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejection(format!("Parâmetro de rota inválido: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejection(format!("Parâmetros de consulta inválidos: {}", rejection.body_text()))
    }
}

/// Render a panic payload caught by `CatchPanicLayer`
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "panic".to_string()
    };

    BackendError::internal(message).into_response()
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiResult<()> {
    ApiResult::error(ErrorKind::NotFound)
}
