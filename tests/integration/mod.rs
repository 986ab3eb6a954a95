//! Integration tests
//!
//! HTTP-level tests of every endpoint, plus SQL-level tests against
//! PostgreSQL.

pub mod api;
pub mod database;
