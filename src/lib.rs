//! Blog API - Main Library
//!
//! A REST backend for a blog: users, tags, articles with their tags, and
//! threaded comments, backed by PostgreSQL.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependency
//!   - The `ApiResult` envelope and the `ErrorKind` taxonomy
//!   - Request and response DTOs
//!   - Field validation helpers and configuration
//!
//! - **`backend`** - The Axum server
//!   - Entity modules (db, schema, service, handlers)
//!   - Persistence (`PgStore`, `MemoryStore`)
//!   - Error rendering, middleware, routing, startup
//!
//! # Result Convention
//!
//! Services never return `Err` to handlers. Every business operation yields an
//! `ApiResult<T>`, which carries its own HTTP status and renders as the JSON
//! body `{ success, data, message, statusCode }` or
//! `{ success: false, error, statusCode }`. Only request extraction,
//! validation, and panics travel through `BackendError` and the panic layer,
//! and both render the same envelope.

/// Types shared across the crate and with API clients
pub mod shared;

/// Server-side code
pub mod backend;
