//! Request Validation
//!
//! Request schemas collect every rule violation into [`ValidationErrors`]
//! instead of stopping at the first one, so a response can list all invalid
//! fields at once. The error-rendering boundary turns a non-empty
//! `ValidationErrors` into a `ValidationError` result (400).
//!
//! # Example
//!
//! ```rust
//! use blog_api::shared::validation::ValidationErrors;
//!
//! let mut errors = ValidationErrors::new();
//! errors.check("name", "ab".chars().count() >= 3, "Nome deve ter no mínimo 3 caracteres");
//! assert!(errors.finish().is_err());
//! ```

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// One rule violation on one request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of field errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.messages().join(", "))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a single violation
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Record `message` against `field` unless `valid` holds
    pub fn check(&mut self, field: &str, valid: bool, message: impl Into<String>) -> &mut Self {
        if !valid {
            self.add(field, message);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Field messages in the order they were recorded
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// `Ok(())` when no violation was recorded
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Length in characters, not bytes
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Check a trimmed string length against an inclusive range
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&char_len(value.trim()))
}

/// Loose email shape check: `local@domain.tld`, no whitespace
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
        }
        None => false,
    }
}

/// Absolute http(s) URL
pub fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Parse a required UUID field, recording a message when it is absent or malformed
pub fn require_uuid(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    label: &str,
) -> Option<Uuid> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.add(field, format!("{label} é obrigatório"));
            None
        }
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.add(field, format!("{label} deve ser um UUID válido"));
                None
            }
        },
    }
}

/// Parse a required text field, recording a message when it is absent or blank
pub fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
    label: &str,
) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(text) if !text.is_empty() => Some(text),
        _ => {
            errors.add(field, format!("{label} é obrigatório"));
            None
        }
    }
}
