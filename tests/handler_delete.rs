mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_delete_success() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "gone", "https://example.com").await;
    let server = common::test_server(common::create_test_state(pool.clone()));

    let response = server.delete("/gone").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "OK", "alias": "gone" }));
    assert_eq!(common::count_links(&pool).await, 0);
}

#[tokio::test]
async fn test_delete_not_found() {
    let pool = common::test_pool().await;
    let server = common::test_server(common::create_test_state(pool));

    let response = server.delete("/nope").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "Error", "error": "url not found" }));
}

#[tokio::test]
async fn test_delete_then_redirect() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "dup", "https://a.com").await;
    let server = common::test_server(common::create_test_state(pool));

    server.delete("/dup").await;
    let response = server.get("/dup").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_frees_alias() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "reuse", "https://a.com").await;
    let server = common::test_server(common::create_test_state(pool));

    server.delete("/reuse").await;

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://b.com", "alias": "reuse" }))
        .await;

    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "OK", "alias": "reuse" }));
}
