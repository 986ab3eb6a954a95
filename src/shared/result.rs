//! Result Envelope
//!
//! Every service operation returns an [`ApiResult`], and every HTTP response
//! body is one. It is a two-variant sum type whose JSON form is:
//!
//! ```json
//! { "success": true,  "data": <T>,  "message": "...",        "statusCode": 200 }
//! { "success": false, "data": null, "error": "..." | [...], "statusCode": 404 }
//! ```
//!
//! Construction never fails: every input shape has its own named constructor,
//! and inputs that carry no usable information fall back to a generic
//! "Erro desconhecido" failure with status 500.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::error::{ApplicationException, ErrorKind};

/// Default message of [`ApiResult::ok`]
pub const DEFAULT_OK_MESSAGE: &str = "Sucesso";
/// Default message of [`ApiResult::created`]
pub const DEFAULT_CREATED_MESSAGE: &str = "Recurso criado com sucesso";
/// Message of the fallback failure
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido";

/// Error field of a failed result: one message or an ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Single(String),
    Many(Vec<String>),
}

impl ErrorPayload {
    /// Flatten into a list of messages
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::Single(message) => vec![message],
            Self::Many(messages) => messages,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(message) => message.is_empty(),
            Self::Many(messages) => messages.is_empty(),
        }
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        Self::Single(message.to_string())
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        Self::Single(message)
    }
}

impl From<Vec<String>> for ErrorPayload {
    fn from(messages: Vec<String>) -> Self {
        Self::Many(messages)
    }
}

impl From<Vec<&str>> for ErrorPayload {
    fn from(messages: Vec<&str>) -> Self {
        Self::Many(messages.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ErrorPayload {
    fn from(messages: [&str; N]) -> Self {
        Self::Many(messages.iter().map(|m| m.to_string()).collect())
    }
}

/// Outcome of an operation: success with data, or failure with messages
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    /// Successful operation
    Ok {
        data: T,
        message: String,
        status_code: u16,
    },
    /// Failed operation
    Err { error: ErrorPayload, status_code: u16 },
}

impl<T> ApiResult<T> {
    /// Success with an explicit message and status
    pub fn success(data: T, message: impl Into<String>, status_code: u16) -> Self {
        Self::Ok {
            data,
            message: message.into(),
            status_code,
        }
    }

    /// Success with status 200
    pub fn ok(data: T) -> Self {
        Self::success(data, DEFAULT_OK_MESSAGE, 200)
    }

    /// Success with status 201
    pub fn created(data: T) -> Self {
        Self::success(data, DEFAULT_CREATED_MESSAGE, 201)
    }

    /// Replace the message of a successful result
    ///
    /// Failed results are returned unchanged.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            Self::Ok {
                data, status_code, ..
            } => Self::Ok {
                data,
                message: message.into(),
                status_code,
            },
            err => err,
        }
    }

    /// Failure for `kind` with its default message
    pub fn error(kind: ErrorKind) -> Self {
        Self::from_exception(&ApplicationException::from(kind))
    }

    /// Failure for `kind` with one or many override messages
    pub fn error_with(kind: ErrorKind, message: impl Into<ErrorPayload>) -> Self {
        Self::from_exception(&ApplicationException::new(message, kind))
    }

    /// Failure mirroring an already-built exception
    pub fn from_exception(exception: &ApplicationException) -> Self {
        Self::Err {
            error: exception.get_messages(),
            status_code: exception.status_code(),
        }
    }

    /// Failure from raw messages and an optional explicit status
    ///
    /// The status defaults to 500. Empty messages, or a status outside the
    /// 4xx/5xx range, yield the unknown-error fallback instead.
    pub fn from_messages(message: impl Into<ErrorPayload>, status_code: Option<u16>) -> Self {
        let error = message.into();
        let status_code = status_code.unwrap_or(500);
        if error.is_empty() || !(400..600).contains(&status_code) {
            return Self::unknown();
        }

        Self::Err { error, status_code }
    }

    /// Generic failure used when the error source carries nothing usable
    pub fn unknown() -> Self {
        Self::Err {
            error: ErrorPayload::Single(UNKNOWN_ERROR_MESSAGE.to_string()),
            status_code: 500,
        }
    }

    pub fn not_found(message: impl Into<ErrorPayload>) -> Self {
        Self::error_with(ErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<ErrorPayload>) -> Self {
        Self::error_with(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<ErrorPayload>) -> Self {
        Self::error_with(ErrorKind::Forbidden, message)
    }

    pub fn conflict(message: impl Into<ErrorPayload>) -> Self {
        Self::error_with(ErrorKind::Conflict, message)
    }

    pub fn validation_error(message: impl Into<ErrorPayload>) -> Self {
        Self::error_with(ErrorKind::ValidationError, message)
    }

    pub fn internal(message: impl Into<ErrorPayload>) -> Self {
        Self::error_with(ErrorKind::InfrastructureError, message)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Ok { status_code, .. } | Self::Err { status_code, .. } => *status_code,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok { data, .. } => Some(data),
            Self::Err { .. } => None,
        }
    }

    pub fn error_payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Ok { .. } => None,
            Self::Err { error, .. } => Some(error),
        }
    }

    /// Transform the data of a successful result
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Ok {
                data,
                message,
                status_code,
            } => ApiResult::Ok {
                data: f(data),
                message,
                status_code,
            },
            Self::Err { error, status_code } => ApiResult::Err { error, status_code },
        }
    }
}

impl<T> From<ApplicationException> for ApiResult<T> {
    fn from(exception: ApplicationException) -> Self {
        Self::from_exception(&exception)
    }
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiResult", 4)?;
        match self {
            Self::Ok {
                data,
                message,
                status_code,
            } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.serialize_field("message", message)?;
                state.serialize_field("statusCode", status_code)?;
            }
            Self::Err { error, status_code } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("data", &Option::<()>::None)?;
                state.serialize_field("error", error)?;
                state.serialize_field("statusCode", status_code)?;
            }
        }
        state.end()
    }
}

/// Raw JSON shape of a response body before the variant is chosen
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
    message: Option<String>,
    error: Option<ErrorPayload>,
    status_code: u16,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResult<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = Envelope::deserialize(deserializer)?;

        if envelope.success {
            let data = serde_json::from_value(envelope.data).map_err(D::Error::custom)?;
            return Ok(Self::Ok {
                data,
                message: envelope.message.unwrap_or_default(),
                status_code: envelope.status_code,
            });
        }

        if !envelope.data.is_null() {
            return Err(D::Error::custom("failed result must carry null data"));
        }
        let error = envelope
            .error
            .ok_or_else(|| D::Error::missing_field("error"))?;

        Ok(Self::Err {
            error,
            status_code: envelope.status_code,
        })
    }
}
