//! Catalog pages through the router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use cornershop_integration_tests::TestContext;
use cornershop_storefront::catalog::Catalog;

fn ids(products: &Value) -> Vec<i64> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_home_lists_featured_and_categories() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/").await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(ids(&r.body["featured"]), vec![1, 2, 5, 8]);

    let categories: Vec<&str> = r.body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        categories,
        vec!["electronics", "furniture", "accessories", "kitchen", "fitness"]
    );
}

#[tokio::test]
async fn test_listing_without_filters() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/products").await;
    assert_eq!(r.body["total"], 8);
    assert_eq!(r.body["max_price"], "199.99");
    assert_eq!(r.body["filters"]["active"], false);
    assert_eq!(r.body["url"], "/products");
}

#[tokio::test]
async fn test_listing_by_category() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/products?category=electronics").await;
    assert_eq!(ids(&r.body["products"]), vec![1, 2, 5, 7]);
    assert_eq!(r.body["filters"]["active"], true);
    assert_eq!(r.body["url"], "/products?category=electronics");

    let active: Vec<&str> = r.body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["active"] == true)
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(active, vec!["electronics"]);
}

#[tokio::test]
async fn test_listing_by_price_and_search() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/products?min_price=40&max_price=90").await;
    assert_eq!(ids(&r.body["products"]), vec![2, 6, 7, 8]);

    let r = ctx.get("/products?q=ECO-FRIENDLY").await;
    assert_eq!(ids(&r.body["products"]), vec![4, 8]);

    let r = ctx.get("/products?category=electronics&q=wireless&max_price=50").await;
    assert_eq!(ids(&r.body["products"]), vec![5]);
}

#[tokio::test]
async fn test_blank_filters_are_ignored() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/products?category=&min_price=&q=").await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["total"], 8);
}

#[tokio::test]
async fn test_malformed_price_is_bad_request() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/products?min_price=cheap").await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(r.body["error"], "Bad request: min_price must be a number");

    let r = ctx.get("/products?max_price=-5").await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_detail_with_related() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/products/1").await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["product"]["name"], "Wireless Bluetooth Headphones");
    assert_eq!(r.body["product"]["price"], "$129.99");
    assert_eq!(ids(&r.body["related_products"]), vec![2, 5, 7]);

    let r = ctx.get("/products/3").await;
    assert!(r.body["related_products"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut ctx = TestContext::new();

    let r = ctx.get("/products/42").await;
    assert_eq!(r.status, StatusCode::NOT_FOUND);
    assert_eq!(r.body["error"], "Not found: product 42");
}

#[tokio::test]
async fn test_custom_catalog() {
    let catalog = Catalog::from_json_str(
        &json!([
            {
                "id": 10,
                "name": "Tea Kettle",
                "description": "Whistles when ready.",
                "price": { "amount": "29.50", "currency_code": "GBP" },
                "image": "/kettle.svg",
                "category": "kitchen",
                "featured": true
            }
        ])
        .to_string(),
    )
    .unwrap();
    let mut ctx = TestContext::with_catalog(catalog);

    let r = ctx.get("/products/10").await;
    assert_eq!(r.body["product"]["price"], "£29.50");
    assert_eq!(r.body["product"]["in_stock"], true);

    let r = ctx.post_form("/cart/add", "product_id=10&quantity=2").await;
    assert_eq!(r.body["cart"]["subtotal"], "£59.00");
}
