//! Article API integration tests

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::create_test_server;
use crate::common::fixtures::{blog_fixture, create_article, create_tag, create_user};
use crate::{assert_failure, assert_success};

const UNKNOWN_ID: &str = "7d9f1f6e-4f4b-4e43-9a6a-3f1d0b6a2c11";

fn tag_names(article: &Value) -> Vec<&str> {
    let mut names: Vec<&str> = article["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    names
}

#[tokio::test]
async fn test_create_article_with_tags() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;

    assert_eq!(blog.article["title"], "Ownership em Rust");
    assert_eq!(blog.article["authorId"], blog.author["id"]);
    assert_eq!(tag_names(&blog.article), vec!["rust"]);

    let path = format!("/api/articles/{}/tags", blog.article["id"].as_str().unwrap());
    let tags = assert_success!(server.get(&path).await, 200);
    assert_eq!(tags[0]["id"], blog.tag["id"]);
}

#[tokio::test]
async fn test_create_article_validation() {
    let server = create_test_server();

    let response = server
        .post("/api/articles")
        .json(&json!({
            "title": "Oi",
            "content": "Um conteúdo longo o bastante para passar.",
            "authorId": "123",
            "tagIds": [],
        }))
        .await;

    assert_failure!(
        response,
        400,
        [
            "Título deve ter no mínimo 3 caracteres",
            "ID do autor deve ser um UUID válido",
            "Um artigo deve ter no mínimo 1 tags",
        ]
    );
}

#[tokio::test]
async fn test_create_article_unknown_author_or_tag() {
    let server = create_test_server();
    let author = create_user(&server, "Ana Lima", "ana@example.com").await;
    let tag = create_tag(&server, "rust").await;

    let unknown_author = server
        .post("/api/articles")
        .json(&json!({
            "title": "Ownership em Rust",
            "content": "Um conteúdo longo o bastante para passar.",
            "authorId": UNKNOWN_ID,
            "tagIds": [tag["id"]],
        }))
        .await;
    assert_failure!(unknown_author, 404, "Autor não encontrado");

    let unknown_tag = server
        .post("/api/articles")
        .json(&json!({
            "title": "Ownership em Rust",
            "content": "Um conteúdo longo o bastante para passar.",
            "authorId": author["id"],
            "tagIds": [tag["id"], UNKNOWN_ID],
        }))
        .await;
    assert_failure!(unknown_tag, 404, format!("Tag com ID {UNKNOWN_ID} não encontrada"));

    let page = assert_success!(server.get("/api/articles").await, 200);
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn test_list_articles_newest_first() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    create_article(&server, "Lifetimes na prática", &blog.author["id"], &[&blog.tag["id"]]).await;

    let page = assert_success!(server.get("/api/articles").add_query_param("limit", "500").await, 200);

    assert_eq!(page["total"], 2);
    assert_eq!(page["limit"], 100);
    assert_eq!(page["items"][0]["title"], "Lifetimes na prática");
    assert_eq!(page["items"][1]["title"], "Ownership em Rust");
    assert_eq!(tag_names(&page["items"][0]), vec!["rust"]);
}

#[tokio::test]
async fn test_search_by_title_and_author() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let bruno = create_user(&server, "Bruno Costa", "bruno@example.com").await;
    create_article(&server, "Tokio em produção", &bruno["id"], &[&blog.tag["id"]]).await;

    let by_title = server.get("/api/articles/search").add_query_param("term", "OWNERSHIP").await;
    let page = assert_success!(by_title, 200);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["title"], "Ownership em Rust");

    let by_author = server.get("/api/articles/search").add_query_param("term", "bruno").await;
    let page = assert_success!(by_author, 200);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["title"], "Tokio em produção");

    let none = server.get("/api/articles/search").add_query_param("term", "python").await;
    assert_eq!(assert_success!(none, 200)["items"], json!([]));
}

#[tokio::test]
async fn test_search_requires_term() {
    let server = create_test_server();

    let response = server.get("/api/articles/search").await;

    assert_failure!(response, 400, "Termo de busca é obrigatório");
}

#[tokio::test]
async fn test_update_replaces_tags() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let axum = create_tag(&server, "axum").await;
    let tokio = create_tag(&server, "tokio").await;
    let path = format!("/api/articles/{}", blog.article["id"].as_str().unwrap());

    let response = server
        .put(&path)
        .json(&json!({ "title": "Ownership e borrowing", "tagIds": [axum["id"], tokio["id"]] }))
        .await;
    let article = assert_success!(response, 200);

    assert_eq!(article["title"], "Ownership e borrowing");
    assert_eq!(tag_names(&article), vec!["axum", "tokio"]);

    let tags_only = server.put(&path).json(&json!({ "tagIds": [blog.tag["id"]] })).await;
    let article = assert_success!(tags_only, 200);
    assert_eq!(article["title"], "Ownership e borrowing");
    assert_eq!(tag_names(&article), vec!["rust"]);
}

#[tokio::test]
async fn test_update_with_unknown_tag_changes_nothing() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let path = format!("/api/articles/{}", blog.article["id"].as_str().unwrap());

    let response = server
        .put(&path)
        .json(&json!({ "title": "Outro título", "tagIds": [UNKNOWN_ID] }))
        .await;
    assert_failure!(response, 404, format!("Tag com ID {UNKNOWN_ID} não encontrada"));

    let article = assert_success!(server.get(&path).await, 200);
    assert_eq!(article["title"], "Ownership em Rust");
    assert_eq!(tag_names(&article), vec!["rust"]);
}

#[tokio::test]
async fn test_delete_article() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let path = format!("/api/articles/{}", blog.article["id"].as_str().unwrap());

    assert_success!(server.delete(&path).await, 200);

    assert_failure!(server.get(&path).await, 404, "Artigo não encontrado");
    assert_failure!(server.delete(&path).await, 409, "Artigo já está desativado");

    let tag_articles = format!("/api/tags/{}/articles", blog.tag["id"].as_str().unwrap());
    assert_eq!(assert_success!(server.get(&tag_articles).await, 200), json!([]));
}
