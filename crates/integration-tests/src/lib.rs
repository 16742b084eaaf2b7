//! Integration tests for the CRM.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (in-memory store)
//! cargo test -p crm-integration-tests
//!
//! # Including the PostgreSQL-backed tests
//! DATABASE_URL=postgres://... cargo run -p crm-cli -- migrate
//! DATABASE_URL=postgres://... cargo test -p crm-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `web_customers` - HTTP routes driven through the router
//! - `console_session` - Scripted console sessions
//! - `store_properties` - Store contract, in-memory and `PostgreSQL`

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use tower::ServiceExt;

use crm_core::NewCustomer;
use crm_server::console::{AsyncLines, Console};
use crm_server::db::{CustomerStore, MemoryCustomerStore};
use crm_server::routes;
use crm_server::state::AppState;

/// A router and the in-memory store behind it.
pub struct TestContext {
    pub store: Arc<MemoryCustomerStore>,
    pub app: Router,
}

impl TestContext {
    /// Fresh router over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryCustomerStore::new());
        let handle: Arc<dyn CustomerStore> = store.clone();
        let app = routes::router(AppState::new(handle));
        Self { store, app }
    }

    /// Send one request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails, which it never does for valid requests.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Run a scripted console session against the same store.
    ///
    /// # Panics
    ///
    /// Panics if the session hits an I/O error or prints invalid UTF-8.
    pub async fn console(&self, script: &str) -> String {
        let mut output = Vec::new();
        let mut console = Console::new(
            self.store.clone(),
            AsyncLines::new(script.as_bytes()),
            &mut output,
        );
        console.run().await.expect("console session failed");
        String::from_utf8(output).expect("console output is UTF-8")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a GET request.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// Build a form-encoded POST request.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
pub fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("valid request")
}

/// Build a JSON POST request.
///
/// # Panics
///
/// Panics if `uri` is not a valid request URI.
#[must_use]
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Read a response body as text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("UTF-8 body")
}

/// Validated input for tests.
///
/// # Panics
///
/// Panics if either field is blank.
#[must_use]
pub fn new_customer(name: &str, age: &str) -> NewCustomer {
    NewCustomer::parse(Some(name.to_owned()), Some(age.to_owned())).expect("valid customer")
}
