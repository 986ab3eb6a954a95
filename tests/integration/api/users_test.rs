//! User API integration tests

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::create_test_server;
use crate::common::fixtures::{create_user, PASSWORD};
use crate::{assert_failure, assert_success};

#[tokio::test]
async fn test_create_user_hides_password() {
    let server = create_test_server();

    let user = create_user(&server, "Ana Lima", "Ana@Example.com").await;

    assert_eq!(user["name"], "Ana Lima");
    assert_eq!(user["email"], "ana@example.com");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
    assert_eq!(user["deletedAt"], json!(null));
}

#[tokio::test]
async fn test_create_user_reports_every_invalid_field() {
    let server = create_test_server();

    let response = server
        .post("/api/users")
        .json(&json!({ "name": "Al", "email": "nope", "password": "123" }))
        .await;

    assert_failure!(
        response,
        400,
        [
            "Nome deve ter no mínimo 3 caracteres",
            "Email inválido",
            "Senha deve ter no mínimo 6 caracteres",
        ]
    );
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let server = create_test_server();
    create_user(&server, "Ana Lima", "ana@example.com").await;

    let response = server
        .post("/api/users")
        .json(&json!({ "name": "Outra Ana", "email": "ana@example.com", "password": PASSWORD }))
        .await;

    assert_failure!(response, 409, "Usuário já cadastrado com esse email");
}

#[tokio::test]
async fn test_list_users_is_paginated_newest_first() {
    let server = create_test_server();
    for (name, email) in [("Ana Lima", "ana@example.com"), ("Bruno", "bruno@example.com"), ("Carla", "carla@example.com")] {
        create_user(&server, name, email).await;
    }

    let response = server
        .get("/api/users")
        .add_query_param("page", "1")
        .add_query_param("limit", "2")
        .await;
    let page = assert_success!(response, 200);

    assert_eq!(page["total"], 3);
    assert_eq!(page["totalPages"], 2);
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Carla", "Bruno"]);
}

#[tokio::test]
async fn test_invalid_pagination() {
    let server = create_test_server();

    let response = server.get("/api/users").add_query_param("page", "0").await;

    assert_failure!(response, 400, "page deve ser um número inteiro positivo");
}

#[tokio::test]
async fn test_update_user() {
    let server = create_test_server();
    let user = create_user(&server, "Ana Lima", "ana@example.com").await;
    let id = user["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/users/{id}"))
        .json(&json!({ "name": "Ana Souza" }))
        .await;
    let updated = assert_success!(response, 200);
    assert_eq!(updated["name"], "Ana Souza");
    assert_eq!(updated["email"], "ana@example.com");

    let response = server.put(&format!("/api/users/{id}")).json(&json!({})).await;
    assert_failure!(response, 400, "Informe ao menos um campo para atualizar");
}

#[tokio::test]
async fn test_update_to_taken_email_is_conflict() {
    let server = create_test_server();
    create_user(&server, "Ana Lima", "ana@example.com").await;
    let bruno = create_user(&server, "Bruno", "bruno@example.com").await;

    let response = server
        .put(&format!("/api/users/{}", bruno["id"].as_str().unwrap()))
        .json(&json!({ "email": "ana@example.com" }))
        .await;

    assert_failure!(response, 409, "Email já está em uso por outro usuário");
}

#[tokio::test]
async fn test_deactivate_and_reactivate() {
    let server = create_test_server();
    let user = create_user(&server, "Ana Lima", "ana@example.com").await;
    let path = format!("/api/users/{}", user["id"].as_str().unwrap());

    let deleted = assert_success!(server.delete(&path).await, 200);
    assert!(deleted["deletedAt"].is_string());

    assert_failure!(server.get(&path).await, 404, "Usuário não encontrado");
    assert_failure!(server.delete(&path).await, 409, "Usuário já está desativado");

    let reactivate = format!("{path}/reactivate");
    let restored = assert_success!(server.post(&reactivate).await, 200);
    assert_eq!(restored["deletedAt"], json!(null));

    assert_failure!(server.post(&reactivate).await, 409, "Usuário já está ativo");
    assert_success!(server.get(&path).await, 200);
}

#[tokio::test]
async fn test_unknown_user() {
    let server = create_test_server();

    let response = server
        .get("/api/users/7d9f1f6e-4f4b-4e43-9a6a-3f1d0b6a2c11")
        .await;

    assert_failure!(response, 404, "Usuário não encontrado");
}
