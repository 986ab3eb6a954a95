//! Authentication Module
//!
//! Password hashing and the session-less login endpoint.
//!
//! - **`password`** - bcrypt hashing with the configured cost
//! - **`schema`** - login request validation
//! - **`service`** - credential checks
//! - **`handlers`** - `POST /api/auth/login`

pub mod handlers;
pub mod password;
pub mod schema;
pub mod service;

pub use password::PasswordHasher;
pub use service::AuthService;
