//! Articles Module
//!
//! Article CRUD, search, and the tag listing of an article.

pub mod db;
pub mod handlers;
pub mod schema;
pub mod service;

pub use db::{Article, ArticleRepository};
pub use service::ArticleService;
