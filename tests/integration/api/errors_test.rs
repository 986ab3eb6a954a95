//! Error rendering at the HTTP boundary

use axum::routing::get;
use axum::Router;
use axum_test::TestServer;
use blog_api::backend::routes::apply_layers;
use serde_json::json;

use crate::assert_failure;
use crate::common::create_test_server;

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = create_test_server();

    let response = server.get("/api/nothing-here").await;

    assert_failure!(response, 404, "Recurso não encontrado");
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let server = create_test_server();

    let response = server
        .post("/api/tags")
        .text("{ not json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["statusCode"], 400);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Corpo da requisição inválido: "), "{error}");
}

#[tokio::test]
async fn test_malformed_path_id_is_validation_error() {
    let server = create_test_server();

    let response = server.get("/api/articles/not-a-uuid").await;

    assert_eq!(response.status_code().as_u16(), 400);
    let body: serde_json::Value = response.json();
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Parâmetro de rota inválido: "), "{error}");
}

#[tokio::test]
async fn test_panic_renders_as_internal_error() {
    async fn boom() -> &'static str {
        panic!("boom")
    }

    let app = apply_layers(Router::new().route("/boom", get(boom)));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/boom").await;

    assert_failure!(response, 500, "Erro interno do servidor: boom");
}
