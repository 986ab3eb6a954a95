//! Common test utilities and helpers
//!
//! - Test server over `MemoryStore`
//! - Fixture builders posting through the public API
//! - Envelope assertion macros
//! - A migrated PostgreSQL database for SQL-level tests

pub mod assertions;
pub mod database;
pub mod fixtures;

use std::sync::Arc;

use axum_test::TestServer;
use blog_api::backend::create_app;
use blog_api::backend::store::MemoryStore;
use blog_api::shared::AppConfig;

/// Lowest cost bcrypt accepts, to keep tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .database_url("postgres://localhost/unused")
        .bcrypt_cost(TEST_BCRYPT_COST)
        .build()
        .expect("test configuration is valid")
}

/// The full application over a fresh in-memory store
pub fn create_test_server() -> TestServer {
    let store = Arc::new(MemoryStore::new());
    let app = create_app(store, &test_config());
    TestServer::new(app).expect("test server starts")
}
