//! Article-Tags Module
//!
//! The many-to-many relation between articles and tags. Service only; the
//! article and tag handlers expose its reads.

pub mod db;
pub mod service;

pub use db::ArticleTagRepository;
pub use service::ArticleTagService;
