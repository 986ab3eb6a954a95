//! Fixture builders
//!
//! Each helper goes through the HTTP API and returns the created resource's
//! `data`, panicking when creation fails.

use axum_test::TestServer;
use serde_json::{json, Value};

pub const PASSWORD: &str = "secret123";

pub async fn create_user(server: &TestServer, name: &str, email: &str) -> Value {
    let response = server
        .post("/api/users")
        .json(&json!({ "name": name, "email": email, "password": PASSWORD }))
        .await;
    crate::assert_success!(response, 201)
}

pub async fn create_tag(server: &TestServer, name: &str) -> Value {
    let response = server.post("/api/tags").json(&json!({ "name": name })).await;
    crate::assert_success!(response, 201)
}

pub async fn create_article(server: &TestServer, title: &str, author_id: &Value, tag_ids: &[&Value]) -> Value {
    let response = server
        .post("/api/articles")
        .json(&json!({
            "title": title,
            "content": "Um conteúdo longo o bastante para passar.",
            "authorId": author_id,
            "tagIds": tag_ids,
        }))
        .await;
    crate::assert_success!(response, 201)
}

pub async fn create_comment(
    server: &TestServer,
    article_id: &Value,
    user_id: &Value,
    parent_id: Option<&Value>,
    content: &str,
) -> Value {
    let response = server
        .post("/api/comments")
        .json(&json!({
            "content": content,
            "articleId": article_id,
            "userId": user_id,
            "parentId": parent_id,
        }))
        .await;
    crate::assert_success!(response, 201)
}

/// An author, a tag, and an article linking them
pub struct BlogFixture {
    pub author: Value,
    pub tag: Value,
    pub article: Value,
}

pub async fn blog_fixture(server: &TestServer) -> BlogFixture {
    let author = create_user(server, "Ana Lima", "ana@example.com").await;
    let tag = create_tag(server, "rust").await;
    let article = create_article(server, "Ownership em Rust", &author["id"], &[&tag["id"]]).await;
    BlogFixture { author, tag, article }
}
