mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_save_without_credentials() {
    let pool = common::test_pool().await;
    let server = common::test_server(common::create_test_state_with_auth(pool.clone()));

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("www-authenticate"));
    assert_eq!(common::count_links(&pool).await, 0);
}

#[tokio::test]
async fn test_save_with_wrong_credentials() {
    let pool = common::test_pool().await;
    let server = common::test_server(common::create_test_state_with_auth(pool));

    let response = server
        .post("/url")
        .add_header("authorization", "Basic YWRtaW46d3Jvbmc=")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "Error", "error": "unauthorized" }));
}

#[tokio::test]
async fn test_save_with_credentials() {
    let pool = common::test_pool().await;
    let server = common::test_server(common::create_test_state_with_auth(pool));

    let response = server
        .post("/url")
        .add_header("authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com", "alias": "docs" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "OK", "alias": "docs" }));
}

#[tokio::test]
async fn test_delete_requires_credentials() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "keep", "https://example.com").await;
    let server = common::test_server(common::create_test_state_with_auth(pool.clone()));

    let response = server.delete("/keep").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(common::count_links(&pool).await, 1);

    let response = server
        .delete("/keep")
        .add_header("authorization", common::TEST_AUTH_HEADER)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(common::count_links(&pool).await, 0);
}

#[tokio::test]
async fn test_redirect_is_public() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "open", "https://example.com").await;
    let server = common::test_server(common::create_test_state_with_auth(pool));

    let response = server.get("/open").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_health_is_public() {
    let pool = common::test_pool().await;
    let server = common::test_server(common::create_test_state_with_auth(pool));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}
