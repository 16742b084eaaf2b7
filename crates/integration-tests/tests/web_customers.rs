//! HTTP routes driven through the router with an in-memory store.

use axum::http::{StatusCode, header};
use serde_json::json;

use crm_integration_tests::{TestContext, body_text, get, post_form, post_json};
use crm_server::db::CustomerStore;

#[tokio::test]
async fn test_index_welcome() {
    let ctx = TestContext::new();
    let resp = ctx.send(get("/")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "Welcome to index route!");
}

#[tokio::test]
async fn test_health_checks() {
    let ctx = TestContext::new();

    let resp = ctx.send(get("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");

    let resp = ctx.send(get("/health/ready")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    ctx.store.set_unavailable(true);
    let resp = ctx.send(get("/health/ready")).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_new_customer_form() {
    let ctx = TestContext::new();
    let resp = ctx.send(get("/customer/new")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap_or("");
    assert!(content_type.starts_with("text/html"));

    let body = body_text(resp).await;
    assert!(body.contains(r#"<form method="POST" action="/customers">"#));
    assert!(body.contains(r#"name="name""#));
    assert!(body.contains(r#"name="age""#));
}

#[tokio::test]
async fn test_create_missing_age_is_bad_request() {
    let ctx = TestContext::new();
    let resp = ctx.send(post_form("/customers", "name=Ada")).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap_or("");
    assert!(content_type.starts_with("text/plain"));
    assert!(body_text(resp).await.starts_with("Name and age are required"));
    assert!(ctx.store.is_empty().await);
}

#[tokio::test]
async fn test_create_blank_name_is_bad_request() {
    let ctx = TestContext::new();
    let resp = ctx.send(post_form("/customers", "name=+&age=30")).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.store.is_empty().await);
}

#[tokio::test]
async fn test_create_without_content_type_is_bad_request() {
    let ctx = TestContext::new();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/customers")
        .body(axum::body::Body::from("name=Ada&age=30"))
        .expect("valid request");
    let resp = ctx.send(request).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(resp).await,
        "Unable to read customer data from the request body."
    );
    assert!(ctx.store.is_empty().await);
}

#[tokio::test]
async fn test_create_with_mistyped_json_field_is_unreadable() {
    let ctx = TestContext::new();
    let resp = ctx
        .send(post_json("/customers", &json!({ "name": "Ada", "age": true })))
        .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(resp).await;
    assert_eq!(body, "Unable to read customer data from the request body.");
    assert!(!body.contains("missing"));
    assert!(ctx.store.is_empty().await);
}

#[tokio::test]
async fn test_create_redirects_and_lists() {
    let ctx = TestContext::new();
    let resp = ctx.send(post_form("/customers", "name=Ada&age=30")).await;

    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers()[header::LOCATION], "/customers");

    let resp = ctx.send(get("/customers")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Name: Ada, Age: 30"));
}

#[tokio::test]
async fn test_create_from_json_with_numeric_age() {
    let ctx = TestContext::new();
    let resp = ctx
        .send(post_json("/customers", &json!({ "name": "Grace", "age": 85 })))
        .await;

    assert!(resp.status().is_redirection());

    let customers = ctx.store.list().await.unwrap_or_default();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers.first().map(|c| c.age.as_str()), Some("85"));
}

#[tokio::test]
async fn test_list_empty() {
    let ctx = TestContext::new();
    let resp = ctx.send(get("/customers")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("No customers yet."));
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let ctx = TestContext::new();
    ctx.store.set_unavailable(true);

    let resp = ctx.send(get("/customers")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_text(resp).await,
        "An error occurred while fetching customers."
    );

    let resp = ctx.send(post_form("/customers", "name=Ada&age=30")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(resp).await;
    assert_eq!(body, "An error occurred while creating the customer");
    assert!(!body.contains("unavailable"));
}

#[tokio::test]
async fn test_no_update_or_delete_routes() {
    let ctx = TestContext::new();

    let request = axum::http::Request::builder()
        .method("DELETE")
        .uri("/customers")
        .body(axum::body::Body::empty())
        .expect("valid request");
    let resp = ctx.send(request).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let resp = ctx.send(get("/customers/some-id")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
