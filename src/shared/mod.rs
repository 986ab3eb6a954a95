//! Shared Module
//!
//! Types with no server dependency: the error taxonomy, the result envelope
//! every response body uses, request validation helpers, the blog DTOs, and
//! application configuration.

/// Error taxonomy and ApplicationException
pub mod error;

/// Result envelope
pub mod result;

/// Field validation helpers
pub mod validation;

/// Blog request and response types
pub mod blog;

/// Application configuration
pub mod config;

pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigErrors};
pub use error::{ApplicationException, ErrorKind};
pub use result::{ApiResult, ErrorPayload};
pub use validation::{FieldError, ValidationErrors};
