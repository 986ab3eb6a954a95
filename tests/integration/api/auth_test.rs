//! Authentication API integration tests

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::create_test_server;
use crate::common::fixtures::{create_user, PASSWORD};
use crate::{assert_failure, assert_success};

#[tokio::test]
async fn test_login_success() {
    let server = create_test_server();
    create_user(&server, "Ana Lima", "ana@example.com").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ANA@example.com", "password": PASSWORD }))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Login realizado com sucesso");
    let user = assert_success!(response, 200);
    assert_eq!(user["email"], "ana@example.com");
    assert!(user.get("token").is_none());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = create_test_server();
    create_user(&server, "Ana Lima", "ana@example.com").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@example.com", "password": "wrongpassword" }))
        .await;
    assert_failure!(wrong_password, 401, "Email ou Senha inválido");

    let unknown = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@example.com", "password": PASSWORD }))
        .await;
    assert_failure!(unknown, 401, "Email ou Senha inválido");
}

#[tokio::test]
async fn test_login_deactivated_account() {
    let server = create_test_server();
    let user = create_user(&server, "Ana Lima", "ana@example.com").await;
    server
        .delete(&format!("/api/users/{}", user["id"].as_str().unwrap()))
        .await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@example.com", "password": PASSWORD }))
        .await;

    assert_failure!(response, 403, "Conta desativada");

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@example.com", "password": "wrong99" }))
        .await;
    assert_failure!(wrong_password, 403, "Conta desativada");
}

#[tokio::test]
async fn test_login_validation() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ana@example.com", "password": "123" }))
        .await;

    assert_failure!(response, 400, "Senha deve ter no mínimo 6 caracteres");
}
