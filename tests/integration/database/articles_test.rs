//! Article and article-tag SQL tests

use blog_api::backend::article_tags::db::ArticleTagRepository;
use blog_api::backend::articles::db::{Article, ArticleChanges, ArticleRepository, NewArticle};
use blog_api::backend::store::PgStore;
use blog_api::backend::tags::db::{Tag, TagRepository};
use blog_api::backend::users::db::{NewUser, User, UserRepository};
use blog_api::shared::blog::Pagination;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::common::database::TestDatabase;

async fn author(store: &PgStore) -> User {
    UserRepository::create(
        store,
        NewUser {
            name: "Ana Lima".into(),
            email: "ana@example.com".into(),
            password_hash: "not-a-real-hash".into(),
            avatar: None,
        },
    )
    .await
    .expect("user is created")
}

async fn tag(store: &PgStore, name: &str) -> Tag {
    TagRepository::create(store, name.into()).await.expect("tag is created")
}

async fn article(store: &PgStore, author: &User, title: &str, tags: &[&Tag]) -> Article {
    store
        .create_with_tags(
            NewArticle {
                title: title.into(),
                content: "Um conteúdo longo o bastante.".into(),
                image: None,
                author_id: author.id,
            },
            tags.iter().map(|t| t.id).collect(),
        )
        .await
        .expect("article is created")
}

async fn tag_names(store: &PgStore, article_id: Uuid) -> Vec<String> {
    store
        .find_tags_by_article(article_id)
        .await
        .expect("tags load")
        .into_iter()
        .map(|t| t.name)
        .collect()
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_replace_tags_replaces_the_set() {
    let db = TestDatabase::new().await;
    let store = db.store();
    let writer = author(store).await;
    let (rust, web, sql) = (tag(store, "rust").await, tag(store, "web").await, tag(store, "sql").await);
    let post = article(store, &writer, "Ownership em Rust", &[&rust, &web]).await;

    store.replace_tags(post.id, vec![sql.id]).await.expect("tags are replaced");

    assert_eq!(tag_names(store, post.id).await, vec!["sql"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_failed_replace_keeps_old_links() {
    let db = TestDatabase::new().await;
    let store = db.store();
    let writer = author(store).await;
    let (rust, web) = (tag(store, "rust").await, tag(store, "web").await);
    let post = article(store, &writer, "Ownership em Rust", &[&rust, &web]).await;

    let result = store.replace_tags(post.id, vec![Uuid::new_v4()]).await;

    assert!(result.is_err(), "unknown tag violates the foreign key");
    assert_eq!(tag_names(store, post.id).await, vec!["rust", "web"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_update_writes_fields_and_tags() {
    let db = TestDatabase::new().await;
    let store = db.store();
    let writer = author(store).await;
    let (rust, web) = (tag(store, "rust").await, tag(store, "web").await);
    let post = article(store, &writer, "Ownership em Rust", &[&rust]).await;

    let changes = ArticleChanges {
        title: Some("Borrowing em Rust".into()),
        ..Default::default()
    };
    let updated = ArticleRepository::update(store, post.id, changes, Some(vec![web.id]))
        .await
        .expect("update succeeds")
        .expect("article is active");

    assert_eq!(updated.title, "Borrowing em Rust");
    assert_eq!(updated.content, post.content);
    assert_eq!(tag_names(store, post.id).await, vec!["web"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_failed_update_rolls_back_fields_and_tags() {
    let db = TestDatabase::new().await;
    let store = db.store();
    let writer = author(store).await;
    let rust = tag(store, "rust").await;
    let post = article(store, &writer, "Ownership em Rust", &[&rust]).await;

    let changes = ArticleChanges {
        title: Some("Borrowing em Rust".into()),
        ..Default::default()
    };
    let result = ArticleRepository::update(store, post.id, changes, Some(vec![Uuid::new_v4()])).await;
    assert!(result.is_err(), "unknown tag violates the foreign key");

    let stored = ArticleRepository::find_by_id(store, post.id)
        .await
        .expect("article loads")
        .expect("article exists");
    assert_eq!(stored.title, "Ownership em Rust");
    assert_eq!(tag_names(store, post.id).await, vec!["rust"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_update_without_tags_keeps_links() {
    let db = TestDatabase::new().await;
    let store = db.store();
    let writer = author(store).await;
    let rust = tag(store, "rust").await;
    let post = article(store, &writer, "Ownership em Rust", &[&rust]).await;

    let changes = ArticleChanges {
        content: Some("Outro conteúdo longo o bastante.".into()),
        ..Default::default()
    };
    let updated = ArticleRepository::update(store, post.id, changes, None)
        .await
        .expect("update succeeds")
        .expect("article is active");

    assert_eq!(updated.title, "Ownership em Rust");
    assert_eq!(updated.content, "Outro conteúdo longo o bastante.");
    assert_eq!(tag_names(store, post.id).await, vec!["rust"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_search_matches_wildcards_literally() {
    let db = TestDatabase::new().await;
    let store = db.store();
    let writer = author(store).await;
    let rust = tag(store, "rust").await;
    article(store, &writer, "Desconto de 50% hoje", &[&rust]).await;
    article(store, &writer, "Desconto de 500 hoje", &[&rust]).await;
    article(store, &writer, "snake_case em Rust", &[&rust]).await;
    article(store, &writer, "snakeXcase em Rust", &[&rust]).await;

    let (found, total) = store.search("50%".into(), Pagination::default()).await.expect("search runs");
    assert_eq!(total, 1);
    assert_eq!(found[0].title, "Desconto de 50% hoje");

    let (found, total) = store
        .search("snake_case".into(), Pagination::default())
        .await
        .expect("search runs");
    assert_eq!(total, 1);
    assert_eq!(found[0].title, "snake_case em Rust");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_search_matches_author_name() {
    let db = TestDatabase::new().await;
    let store = db.store();
    let writer = author(store).await;
    let rust = tag(store, "rust").await;
    article(store, &writer, "Ownership em Rust", &[&rust]).await;

    let (found, total) = store.search("LIMA".into(), Pagination::default()).await.expect("search runs");
    assert_eq!(total, 1);
    assert_eq!(found[0].author_id, writer.id);
}
