//! Common test utilities and helpers
//!
//! Every test gets its own server over a fresh in-memory store, so tests
//! never share state.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};

use devconnect::backend::server::create_app_with_database;
use devconnect::backend::store::Database;
use devconnect::shared::AppConfig;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Configuration with the cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .build()
        .expect("valid test configuration")
}

pub fn create_test_server() -> TestServer {
    let app = create_app_with_database(test_config(), Database::in_memory());
    TestServer::new(app).expect("Failed to start test server")
}

/// Attach `token` the way clients send it
pub fn with_token(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(
        HeaderName::from_static("x-auth-token"),
        HeaderValue::from_str(token).expect("token is a valid header value"),
    )
}

/// Register a user and return their token
pub async fn register_user(server: &TestServer, name: &str, email: &str) -> String {
    let response = server
        .post("/api/users")
        .json(&json!({ "name": name, "email": email, "password": "secret123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    response.json::<Value>()["token"]
        .as_str()
        .expect("token in register response")
        .to_string()
}

/// Create the minimal profile for the token's owner
pub async fn create_profile(server: &TestServer, token: &str) -> Value {
    let response = with_token(server.post("/api/profile"), token)
        .json(&json!({ "status": "Developer", "skills": "rust, sql" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    response.json()
}

/// Create a post and return it
pub async fn create_post(server: &TestServer, token: &str, text: &str) -> Value {
    let response = with_token(server.post("/api/posts"), token)
        .json(&json!({ "text": text }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    response.json()
}
