//! Backend Module
//!
//! The Axum HTTP server.
//!
//! # Architecture
//!
//! Each entity lives in its own module with the same four parts:
//!
//! - **`db`** - row type, repository trait, and its PostgreSQL implementation
//! - **`schema`** - request validation into typed inputs
//! - **`service`** - business rules returning `ApiResult<T>`
//! - **`handlers`** - HTTP extraction and delegation to the service
//!
//! Supporting modules:
//!
//! - **`server`** - application state, startup, assembly
//! - **`routes`** - route table and shared layers
//! - **`store`** - `PgStore` and `MemoryStore`
//! - **`middleware`** - request logging
//! - **`error`** - `BackendError` and response rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── users/         - accounts, soft delete, reactivation
//! ├── auth/          - password hashing, login
//! ├── tags/          - tag CRUD
//! ├── articles/      - article CRUD and search
//! ├── article_tags/  - article-tag relation (no routes)
//! ├── comments/      - threaded comments
//! ├── store/         - persistence backends
//! ├── server/        - state and startup
//! ├── routes/        - router
//! ├── middleware/    - request logging
//! └── error/         - error rendering
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Middleware for request processing
pub mod middleware;

/// Persistence backends
pub mod store;

/// User accounts
pub mod users;

/// Password hashing and login
pub mod auth;

/// Tags
pub mod tags;

/// Articles
pub mod articles;

/// Article-tag relation
pub mod article_tags;

/// Threaded comments
pub mod comments;

pub use error::BackendError;
pub use server::create_app;
