/**
 * Backend Error Types
 *
 * `BackendError` is what a handler returns when it cannot produce an
 * `ApiResult` itself: the request failed schema validation, axum rejected the
 * body or a parameter, or something faulted outside the service layer.
 *
 * # Categories
 *
 * - **Client errors** (`Validation`, `Rejection`) render as a
 *   `VALIDATION_ERROR` result with status 400.
 * - **Faults** (`Database`, `Password`, `Serialization`, `Internal`) render as
 *   an `INFRASTRUCTURE_ERROR` result with status 500 whose message embeds the
 *   original error text.
 */

use thiserror::Error;

use crate::shared::error::ErrorKind;
use crate::shared::result::ApiResult;
use crate::shared::validation::ValidationErrors;

/// Failure raised while processing a request
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more request fields broke a schema rule
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The request body, path, or query could not be extracted
    #[error("{0}")]
    Rejection(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Password(#[from] bcrypt::BcryptError),

    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other uncaught fault, including handler panics
    #[error("{0}")]
    Internal(String),
}

impl BackendError {
    pub fn rejection(message: impl Into<String>) -> Self {
        Self::Rejection(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the client caused this error
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Rejection(_))
    }

    /// Kind of the result this error renders as
    pub fn kind(&self) -> ErrorKind {
        if self.is_client_error() {
            ErrorKind::ValidationError
        } else {
            ErrorKind::InfrastructureError
        }
    }

    /// Convert into the result written as the response body
    ///
    /// Field errors keep every message; faults collapse into one message of the
    /// form `"Erro interno do servidor: <original message>"`.
    pub fn to_result<T>(&self) -> ApiResult<T> {
        match self {
            Self::Validation(errors) => ApiResult::validation_error(errors.messages()),
            Self::Rejection(message) => ApiResult::validation_error(message.as_str()),
            fault => ApiResult::internal(format!(
                "{}: {}",
                ErrorKind::InfrastructureError.default_message(),
                fault
            )),
        }
    }
}
