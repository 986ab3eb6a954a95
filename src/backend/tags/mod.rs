//! Tags Module
//!
//! Tag CRUD with soft delete, plus the article listing of a tag.

pub mod db;
pub mod handlers;
pub mod schema;
pub mod service;

pub use db::{Tag, TagRepository};
pub use service::TagService;
