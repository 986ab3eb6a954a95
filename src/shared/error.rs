//! Shared Error Types
//!
//! This module defines the closed error taxonomy used by every layer of the
//! blog API, together with [`ApplicationException`], the structured failure
//! value that turns a named [`ErrorKind`] into the status code and messages of
//! an error response.
//!
//! # Error Kinds
//!
//! | Kind | Status | Default message |
//! |------|--------|-----------------|
//! | `RequiredField` | 400 | Campo obrigatório |
//! | `InvalidField` | 400 | Campo inválido |
//! | `ValidationError` | 400 | Dados inválidos |
//! | `NotFound` | 404 | Recurso não encontrado |
//! | `Unauthorized` | 401 | Não autorizado |
//! | `Forbidden` | 403 | Acesso negado |
//! | `Conflict` | 409 | Conflito de dados |
//! | `InfrastructureError` | 500 | Erro interno do servidor |
//! | `DatabaseError` | 500 | Erro no banco de dados |
//! | `ExternalServiceError` | 502 | Erro em serviço externo |
//!
//! # Usage
//!
//! ```rust
//! use blog_api::shared::error::{ApplicationException, ErrorKind};
//!
//! let error = ApplicationException::not_found("Artigo não encontrado");
//! assert!(error.is(ErrorKind::NotFound));
//! assert_eq!(error.status_code(), 404);
//! ```

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::shared::result::ErrorPayload;

/// Closed set of failure categories
///
/// The status code and default message of every kind are resolved by an
/// exhaustive `match`, so adding a variant without a mapping does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    RequiredField,
    InvalidField,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    ValidationError,
    InfrastructureError,
    DatabaseError,
    ExternalServiceError,
}

impl ErrorKind {
    /// Every kind, in declaration order
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::RequiredField,
        ErrorKind::InvalidField,
        ErrorKind::NotFound,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::Conflict,
        ErrorKind::ValidationError,
        ErrorKind::InfrastructureError,
        ErrorKind::DatabaseError,
        ErrorKind::ExternalServiceError,
    ];

    /// HTTP status code reported for this kind
    pub const fn status_code(self) -> u16 {
        match self {
            Self::RequiredField | Self::InvalidField | Self::ValidationError => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InfrastructureError | Self::DatabaseError => 500,
            Self::ExternalServiceError => 502,
        }
    }

    /// Human-readable message used when no override is supplied
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::RequiredField => "Campo obrigatório",
            Self::InvalidField => "Campo inválido",
            Self::ValidationError => "Dados inválidos",
            Self::NotFound => "Recurso não encontrado",
            Self::Unauthorized => "Não autorizado",
            Self::Forbidden => "Acesso negado",
            Self::Conflict => "Conflito de dados",
            Self::InfrastructureError => "Erro interno do servidor",
            Self::DatabaseError => "Erro no banco de dados",
            Self::ExternalServiceError => "Erro em serviço externo",
        }
    }

    /// Wire name of the kind (e.g. `NOT_FOUND`)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequiredField => "REQUIRED_FIELD",
            Self::InvalidField => "INVALID_FIELD",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InfrastructureError => "INFRASTRUCTURE_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured business-rule failure
///
/// Carries one [`ErrorKind`] and a non-empty, ordered list of messages. The
/// status code is always derived from the kind and cannot be set on its own.
///
/// # Example
///
/// ```rust
/// use blog_api::shared::error::{ApplicationException, ErrorKind};
/// use blog_api::shared::result::ErrorPayload;
///
/// let error = ApplicationException::new(
///     vec!["Título muito curto", "Conteúdo obrigatório"],
///     ErrorKind::ValidationError,
/// );
/// assert_eq!(error.status_code(), 400);
/// assert!(matches!(error.get_messages(), ErrorPayload::Many(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join(", "))]
pub struct ApplicationException {
    kind: ErrorKind,
    messages: Vec<String>,
    status_code: u16,
}

impl ApplicationException {
    /// Create an exception from one or many messages
    ///
    /// An empty message list is replaced by the kind's default message so the
    /// non-empty invariant always holds.
    pub fn new(message: impl Into<ErrorPayload>, kind: ErrorKind) -> Self {
        let mut messages = message.into().into_messages();
        if messages.is_empty() {
            messages.push(kind.default_message().to_string());
        }

        Self {
            kind,
            messages,
            status_code: kind.status_code(),
        }
    }

    pub fn not_found(message: impl Into<ErrorPayload>) -> Self {
        Self::new(message, ErrorKind::NotFound)
    }

    pub fn unauthorized(message: impl Into<ErrorPayload>) -> Self {
        Self::new(message, ErrorKind::Unauthorized)
    }

    pub fn forbidden(message: impl Into<ErrorPayload>) -> Self {
        Self::new(message, ErrorKind::Forbidden)
    }

    pub fn conflict(message: impl Into<ErrorPayload>) -> Self {
        Self::new(message, ErrorKind::Conflict)
    }

    pub fn validation_error(message: impl Into<ErrorPayload>) -> Self {
        Self::new(message, ErrorKind::ValidationError)
    }

    pub fn internal(message: impl Into<ErrorPayload>) -> Self {
        Self::new(message, ErrorKind::InfrastructureError)
    }

    /// Check the exception's kind
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// All stored messages, in insertion order
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Messages as rendered on the wire
    ///
    /// A single stored message collapses to a bare string; two or more are
    /// returned as the full list. Clients pattern-match on this shape.
    pub fn get_messages(&self) -> ErrorPayload {
        match self.messages.as_slice() {
            [single] => ErrorPayload::Single(single.clone()),
            many => ErrorPayload::Many(many.to_vec()),
        }
    }
}

/// Exception carrying the kind's default message
impl From<ErrorKind> for ApplicationException {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind.default_message(), kind)
    }
}

/// Serializes as `{name, message, kind, statusCode}` for logging and transport
impl Serialize for ApplicationException {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApplicationException", 4)?;
        state.serialize_field("name", "ApplicationException")?;
        state.serialize_field("message", &self.get_messages())?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("statusCode", &self.status_code)?;
        state.end()
    }
}
