//! Fault translation for the service layer
//!
//! Services never let a repository or hashing error escape. These adapters log
//! the underlying error and replace it with an `ApplicationException` that
//! carries only a generic, operation-specific message.

use std::fmt::Display;

use crate::shared::error::ApplicationException;

/// Map any error into a generic infrastructure failure
///
/// ```rust,ignore
/// let user = repo.find_by_id(id).await.map_err(fault("Erro ao buscar usuário"))?;
/// ```
pub fn fault<E: Display>(message: &'static str) -> impl FnOnce(E) -> ApplicationException {
    move |err| {
        tracing::error!(error = %err, "{message}");
        ApplicationException::internal(message)
    }
}

/// Like [`fault`], but a unique-constraint violation becomes a conflict
///
/// Covers inserts that race past the service's own existence check.
pub fn conflict_or_fault(
    conflict: &'static str,
    message: &'static str,
) -> impl FnOnce(sqlx::Error) -> ApplicationException {
    move |err| {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                tracing::warn!(error = %err, "{conflict}");
                return ApplicationException::conflict(conflict);
            }
        }
        fault(message)(err)
    }
}
