//! PostgreSQL integration tests

mod articles_test;
mod migrations_test;
