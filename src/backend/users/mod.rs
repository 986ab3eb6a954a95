//! Users Module
//!
//! Registration, lookup, update, and soft delete of user accounts.
//!
//! ```text
//! users/
//! ├── schema.rs   - Request validation
//! ├── db.rs       - User row, UserRepository, SQL
//! ├── service.rs  - Business rules
//! └── handlers.rs - HTTP controllers
//! ```

pub mod db;
pub mod handlers;
pub mod schema;
pub mod service;

pub use db::{User, UserRepository};
pub use service::UserService;
