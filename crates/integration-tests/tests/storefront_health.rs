//! Health endpoints and request IDs.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::Value;

use cornershop_integration_tests::TestContext;
use cornershop_storefront::catalog::Catalog;
use cornershop_storefront::middleware::REQUEST_ID_HEADER;

#[tokio::test]
async fn test_liveness() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/health").await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn test_ready_with_products() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.get("/health/ready").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_not_ready_with_empty_catalog() {
    let mut ctx = TestContext::with_catalog(Catalog::from_products(Vec::new()).unwrap());
    assert_eq!(
        ctx.get("/health/ready").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/products").await;
    let id = r.header(REQUEST_ID_HEADER).unwrap();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.get("/nowhere").await.status, StatusCode::NOT_FOUND);
}
