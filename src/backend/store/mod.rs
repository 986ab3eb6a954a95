//! Persistence Module
//!
//! The persistence client is an explicit value: `main` constructs a
//! [`PgStore`], hands clones of it to the services, and closes it after the
//! server stops. Each entity module declares its repository trait next to its
//! SQL; both [`PgStore`] and the in-memory [`MemoryStore`] implement all of
//! them.

/// PostgreSQL-backed store
pub mod postgres;

/// In-memory store for tests and local experiments
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::backend::article_tags::db::ArticleTagRepository;
use crate::backend::articles::db::ArticleRepository;
use crate::backend::comments::db::CommentRepository;
use crate::backend::tags::db::TagRepository;
use crate::backend::users::db::UserRepository;

/// A store implementing every repository
pub trait BlogStore:
    UserRepository + TagRepository + ArticleRepository + ArticleTagRepository + CommentRepository + 'static
{
}

impl<T> BlogStore for T where
    T: UserRepository + TagRepository + ArticleRepository + ArticleTagRepository + CommentRepository + 'static
{
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in `term` escaped
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
