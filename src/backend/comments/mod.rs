//! Comments Module
//!
//! Threaded comments on articles.

pub mod db;
pub mod handlers;
pub mod schema;
pub mod service;

pub use db::{Comment, CommentRepository};
pub use service::CommentService;
