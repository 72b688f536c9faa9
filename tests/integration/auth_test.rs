//! Authentication API integration tests
//!
//! Registration, login and the current-user endpoint.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_server, register_user, test_config, with_token};
use devconnect::backend::auth::Sessions;

#[tokio::test]
async fn test_register_returns_token_for_new_user() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let sessions = Sessions::from_config(&test_config());
    let user_id = sessions.verify_token(&token).unwrap();

    let me: Value = with_token(server.get("/api/auth"), &token).await.json();
    assert_eq!(me["_id"], json!(user_id.to_string()));
}

#[tokio::test]
async fn test_register_validation_errors() {
    let server = create_test_server();

    let response = server
        .post("/api/users")
        .json(&json!({ "name": "", "email": "not-an-email", "password": "123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let params: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["param"].as_str().unwrap())
        .collect();
    assert_eq!(params, vec!["name", "email", "password"]);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = create_test_server();
    register_user(&server, "Alice", "alice@example.com").await;

    let response = server
        .post("/api/users")
        .json(&json!({
            "name": "Other Alice",
            "email": "Alice@Example.com",
            "password": "secret123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["msg"], json!("User already exists"));

    // The first account still logs in with its own password
    let login = server
        .post("/api/auth")
        .json(&json!({ "email": "alice@example.com", "password": "secret123" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_success() {
    let server = create_test_server();
    register_user(&server, "Alice", "alice@example.com").await;

    let response = server
        .post("/api/auth")
        .json(&json!({ "email": "alice@example.com", "password": "secret123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = create_test_server();
    register_user(&server, "Alice", "alice@example.com").await;

    let wrong_password = server
        .post("/api/auth")
        .json(&json!({ "email": "alice@example.com", "password": "wrong-password" }))
        .await;
    let unknown_email = server
        .post("/api/auth")
        .json(&json!({ "email": "nobody@example.com", "password": "secret123" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.text(), unknown_email.text());
    assert_eq!(
        wrong_password.json::<Value>(),
        json!({ "errors": [{ "msg": "Invalid Credentials" }] })
    );
}

#[tokio::test]
async fn test_me_hides_password() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let response = with_token(server.get("/api/auth"), &token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], json!("Alice"));
    assert_eq!(body["email"], json!("alice@example.com"));
    assert!(body["avatar"].as_str().unwrap().starts_with("//www.gravatar.com/avatar/"));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_me_requires_token() {
    let server = create_test_server();

    let missing = server.get("/api/auth").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        missing.json::<Value>(),
        json!({ "msg": "No token, authorization denied" })
    );

    let invalid = with_token(server.get("/api/auth"), "garbage").await;
    assert_eq!(invalid.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(invalid.json::<Value>(), json!({ "msg": "Token is not valid" }));
}

#[tokio::test]
async fn test_bearer_header_accepted() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let response = server
        .get("/api/auth")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_wrong_field_type_is_validation_error() {
    let server = create_test_server();

    let response = server
        .post("/api/users")
        .json(&json!({ "name": 5, "email": "c@x.com", "password": "secret1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "errors": [{ "msg": "Invalid request body" }] })
    );
    assert!(!response.text().contains("invalid type"));
}

#[tokio::test]
async fn test_register_without_content_type_is_validation_error() {
    let server = create_test_server();

    let response = server
        .post("/api/users")
        .text(r#"{"name":"Carol","email":"c@x.com","password":"secret1"}"#)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "errors": [{ "msg": "Invalid request body" }] })
    );
}

#[tokio::test]
async fn test_login_malformed_json_is_validation_error() {
    let server = create_test_server();

    let response = server
        .post("/api/auth")
        .bytes("{\"email\":".into())
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "errors": [{ "msg": "Invalid request body" }] })
    );
}
