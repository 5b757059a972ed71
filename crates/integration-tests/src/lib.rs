//! Integration tests for Corner Shop.
//!
//! Tests drive the full storefront router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cornershop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Session carts, notices and checkout
//! - `storefront_catalog` - Home page, listing filters, product detail
//! - `storefront_contact` - Contact form validation and receipts
//! - `storefront_health` - Liveness and readiness

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use cornershop_storefront::catalog::Catalog;
use cornershop_storefront::config::SimulationConfig;
use cornershop_storefront::middleware::SESSION_COOKIE_NAME;
use cornershop_storefront::{AppState, StorefrontConfig, app};

/// Upper bound on response bodies read by tests.
const BODY_LIMIT: usize = 1024 * 1024;

/// A response with its body decoded as JSON (`Value::Null` when empty).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Header value as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A browser-like client: one router, one session cookie.
pub struct TestContext {
    router: Router,
    cookie: Option<String>,
}

impl TestContext {
    /// Storefront over the built-in catalog with no simulated delays.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::seeded())
    }

    /// Storefront over a custom catalog with no simulated delays.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let config = StorefrontConfig {
            simulation: SimulationConfig::instant(),
            ..StorefrontConfig::default()
        };
        Self {
            router: app(AppState::with_catalog(config, catalog)),
            cookie: None,
        }
    }

    /// A second shopper sharing the same server state but not the session.
    #[must_use]
    pub fn other_shopper(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Whether the storefront has issued a session cookie yet.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Some(("application/x-www-form-urlencoded", form.to_string())),
        )
        .await
    }

    /// POST a JSON body.
    pub async fn post_json(&mut self, uri: &str, json: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(("application/json", json.to_string())))
            .await
    }

    #[allow(clippy::unwrap_used)]
    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<(&str, String)>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some((content_type, body)) => request
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body)),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        self.remember_session(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn remember_session(&mut self, headers: &HeaderMap) {
        let prefix = format!("{SESSION_COOKIE_NAME}=");
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            if let Some(pair) = value.split(';').next().filter(|p| p.starts_with(&prefix)) {
                self.cookie = Some(pair.to_string());
            }
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
