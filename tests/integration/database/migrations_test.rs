//! Schema and startup tests

use std::io;
use std::sync::{Arc, Mutex};

use blog_api::backend::server::load_store;
use tracing_subscriber::fmt::MakeWriter;

use crate::common::database::{database_config, TestDatabase};

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_migrations_create_every_table() {
    let db = TestDatabase::new().await;

    for table in ["users", "tags", "articles", "article_tags", "comments"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {table} LIMIT 1"))
            .execute(db.store().pool())
            .await;
        assert!(result.is_ok(), "{table} table should exist");
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_migrations_are_idempotent() {
    let db = TestDatabase::new().await;
    assert!(db.store().migrate().await.is_ok());
}

/// Log output collected in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn count(&self, needle: &str) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).matches(needle).count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_startup_logs_each_step_once() {
    let db = TestDatabase::new().await;
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();

    let store = {
        let _default = tracing::subscriber::set_default(subscriber);
        load_store(&database_config()).await.expect("store loads")
    };
    store.close().await;
    drop(db);

    for line in [
        "Connecting to database...",
        "Database connection pool created successfully",
        "Running database migrations...",
        "Database migrations completed successfully",
    ] {
        assert_eq!(logs.count(line), 1, "{line:?} should be logged once");
    }
}
