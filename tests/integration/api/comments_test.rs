//! Comment API integration tests

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::create_test_server;
use crate::common::fixtures::{blog_fixture, create_article, create_comment, create_user};
use crate::{assert_failure, assert_success};

fn contents(comments: &Value) -> Vec<&str> {
    comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_comment_and_reply() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;

    let comment = create_comment(&server, &blog.article["id"], &blog.author["id"], None, "Ótimo artigo").await;
    assert_eq!(comment["parentId"], json!(null));
    assert_eq!(comment["articleId"], blog.article["id"]);

    let reply = create_comment(
        &server,
        &blog.article["id"],
        &blog.author["id"],
        Some(&comment["id"]),
        "Obrigada!",
    )
    .await;
    assert_eq!(reply["parentId"], comment["id"]);
}

#[tokio::test]
async fn test_comment_validation() {
    let server = create_test_server();

    let response = server
        .post("/api/comments")
        .json(&json!({ "content": "x", "articleId": "nope" }))
        .await;

    assert_failure!(
        response,
        400,
        [
            "Comentário deve ter no mínimo 2 caracteres",
            "ID do artigo deve ser um UUID válido",
            "ID do usuário é obrigatório",
        ]
    );
}

#[tokio::test]
async fn test_reply_must_stay_on_the_same_article() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let other = create_article(&server, "Outro artigo", &blog.author["id"], &[&blog.tag["id"]]).await;
    let comment = create_comment(&server, &blog.article["id"], &blog.author["id"], None, "Primeiro").await;

    let response = server
        .post("/api/comments")
        .json(&json!({
            "content": "Resposta perdida",
            "articleId": other["id"],
            "userId": blog.author["id"],
            "parentId": comment["id"],
        }))
        .await;

    assert_failure!(response, 400, "Comentário pai pertence a outro artigo");
}

#[tokio::test]
async fn test_comment_on_deleted_article() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    server
        .delete(&format!("/api/articles/{}", blog.article["id"].as_str().unwrap()))
        .await;

    let response = server
        .post("/api/comments")
        .json(&json!({
            "content": "Tarde demais",
            "articleId": blog.article["id"],
            "userId": blog.author["id"],
        }))
        .await;

    assert_failure!(response, 404, "Artigo não encontrado");
}

#[tokio::test]
async fn test_article_threads() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let bruno = create_user(&server, "Bruno Costa", "bruno@example.com").await;
    let article_id = &blog.article["id"];

    let first = create_comment(&server, article_id, &bruno["id"], None, "Primeiro").await;
    let second = create_comment(&server, article_id, &bruno["id"], None, "Segundo").await;
    create_comment(&server, article_id, &blog.author["id"], Some(&first["id"]), "Resposta A").await;
    let nested = create_comment(&server, article_id, &bruno["id"], Some(&first["id"]), "Resposta B").await;
    create_comment(&server, article_id, &blog.author["id"], Some(&nested["id"]), "Tréplica").await;

    let path = format!("/api/articles/{}/comments", article_id.as_str().unwrap());
    let threads = assert_success!(server.get(&path).await, 200);

    assert_eq!(contents(&threads), vec!["Segundo", "Primeiro"]);
    assert_eq!(threads[0]["id"], second["id"]);
    assert_eq!(threads[0]["replies"], json!([]));
    assert_eq!(contents(&threads[1]["replies"]), vec!["Resposta A", "Resposta B"]);
    assert!(threads[1]["replies"][1].get("replies").is_none());

    let replies = format!("/api/comments/{}/replies", nested["id"].as_str().unwrap());
    let page = assert_success!(server.get(&replies).await, 200);
    assert_eq!(contents(&page["items"]), vec!["Tréplica"]);
}

#[tokio::test]
async fn test_threads_carry_the_commenter() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let bruno = create_user(&server, "Bruno Costa", "bruno@example.com").await;
    let article_id = &blog.article["id"];
    let root = create_comment(&server, article_id, &bruno["id"], None, "Pergunta").await;
    create_comment(&server, article_id, &blog.author["id"], Some(&root["id"]), "Resposta").await;

    let path = format!("/api/articles/{}/comments", article_id.as_str().unwrap());
    let threads = assert_success!(server.get(&path).await, 200);

    assert_eq!(
        threads[0]["user"],
        json!({ "id": bruno["id"], "name": "Bruno Costa", "avatar": null })
    );
    assert_eq!(
        threads[0]["replies"][0]["user"],
        json!({ "id": blog.author["id"], "name": "Ana Lima", "avatar": null })
    );
    assert!(threads[0]["user"].get("email").is_none());
}

#[tokio::test]
async fn test_long_reply_chain_is_served() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let article_id = &blog.article["id"];
    let root = create_comment(&server, article_id, &blog.author["id"], None, "Raiz").await;

    let mut parent = root["id"].clone();
    for depth in 0..200 {
        let reply = create_comment(
            &server,
            article_id,
            &blog.author["id"],
            Some(&parent),
            &format!("Nível {depth}"),
        )
        .await;
        parent = reply["id"].clone();
    }

    let path = format!("/api/articles/{}/comments", article_id.as_str().unwrap());
    let threads = assert_success!(server.get(&path).await, 200);

    assert_eq!(contents(&threads), vec!["Raiz"]);
    assert_eq!(contents(&threads[0]["replies"]), vec!["Nível 0"]);
}

#[tokio::test]
async fn test_deleted_comment_hides_its_replies() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let article_id = &blog.article["id"];
    let parent = create_comment(&server, article_id, &blog.author["id"], None, "Pai").await;
    create_comment(&server, article_id, &blog.author["id"], Some(&parent["id"]), "Filho").await;
    create_comment(&server, article_id, &blog.author["id"], None, "Vizinho").await;

    let parent_path = format!("/api/comments/{}", parent["id"].as_str().unwrap());
    assert_success!(server.delete(&parent_path).await, 200);
    assert_failure!(server.delete(&parent_path).await, 409, "Comentário já está desativado");
    assert_failure!(server.get(&parent_path).await, 404, "Comentário não encontrado");

    let path = format!("/api/articles/{}/comments", article_id.as_str().unwrap());
    let threads = assert_success!(server.get(&path).await, 200);
    assert_eq!(contents(&threads), vec!["Vizinho"]);
}

#[tokio::test]
async fn test_list_comments_and_replies() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let article_id = &blog.article["id"];
    let first = create_comment(&server, article_id, &blog.author["id"], None, "Primeiro").await;
    create_comment(&server, article_id, &blog.author["id"], None, "Segundo").await;
    create_comment(&server, article_id, &blog.author["id"], Some(&first["id"]), "Resposta 1").await;
    create_comment(&server, article_id, &blog.author["id"], Some(&first["id"]), "Resposta 2").await;

    let page = assert_success!(server.get("/api/comments").await, 200);
    assert_eq!(page["total"], 2);
    assert_eq!(contents(&page["items"]), vec!["Segundo", "Primeiro"]);

    let path = format!("/api/comments/{}/replies", first["id"].as_str().unwrap());
    let replies = assert_success!(server.get(&path).add_query_param("limit", "1").await, 200);
    assert_eq!(replies["total"], 2);
    assert_eq!(replies["totalPages"], 2);
    assert_eq!(contents(&replies["items"]), vec!["Resposta 1"]);
}

#[tokio::test]
async fn test_update_comment() {
    let server = create_test_server();
    let blog = blog_fixture(&server).await;
    let comment = create_comment(&server, &blog.article["id"], &blog.author["id"], None, "Rascunho").await;
    let path = format!("/api/comments/{}", comment["id"].as_str().unwrap());

    let updated = assert_success!(server.put(&path).json(&json!({ "content": "Versão final" })).await, 200);
    assert_eq!(updated["content"], "Versão final");

    let missing = server.put(&path).json(&json!({})).await;
    assert_failure!(missing, 400, "Conteúdo do comentário é obrigatório");

    let blank = server.put(&path).json(&json!({ "content": "   " })).await;
    assert_failure!(blank, 400, "Comentário deve ter no mínimo 2 caracteres");
}
