//! Contact form through the router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use cornershop_integration_tests::TestContext;

#[tokio::test]
async fn test_contact_success_returns_receipt() {
    let mut ctx = TestContext::new();

    let r = ctx
        .post_json(
            "/contact",
            &json!({
                "name": "Ada Lovelace",
                "email": "Ada@Example.com",
                "subject": "Order question",
                "message": "Where is my bottle?"
            }),
        )
        .await;

    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["success"], true);
    assert_eq!(
        r.body["message"],
        "Message sent successfully! We'll get back to you soon."
    );
    assert!(r.body["reference"].is_string());
    assert!(r.body["received_at"].is_string());
}

#[tokio::test]
async fn test_contact_subject_is_optional() {
    let mut ctx = TestContext::new();

    let r = ctx
        .post_json(
            "/contact",
            &json!({ "name": "Ada", "email": "ada@example.com", "message": "Hi" }),
        )
        .await;
    assert_eq!(r.status, StatusCode::OK);
}

#[tokio::test]
async fn test_contact_rejects_invalid_email() {
    let mut ctx = TestContext::new();

    let r = ctx
        .post_json(
            "/contact",
            &json!({ "name": "Ada", "email": "ada@localhost", "message": "Hi" }),
        )
        .await;

    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(r.body["success"], false);
    assert_eq!(r.body["message"], "Please enter a valid email address.");
    assert!(r.body.get("reference").is_none());
}

#[tokio::test]
async fn test_contact_requires_name_and_message() {
    let mut ctx = TestContext::new();

    let r = ctx
        .post_json(
            "/contact",
            &json!({ "name": " ", "email": "ada@example.com", "message": "Hi" }),
        )
        .await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(r.body["message"], "Name and message are required.");
}
