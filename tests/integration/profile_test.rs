//! Profile API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_profile, create_test_server, register_user, with_token};

async fn my_id(server: &axum_test::TestServer, token: &str) -> String {
    let me: Value = with_token(server.get("/api/auth"), token).await.json();
    me["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_my_profile_missing() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let response = with_token(server.get("/api/profile/me"), &token).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "msg": "There is no profile for this user" })
    );
}

#[tokio::test]
async fn test_create_then_update_merges_fields() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let created = with_token(server.post("/api/profile"), &token)
        .json(&json!({
            "status": "Developer",
            "skills": "rust, go",
            "company": "Acme",
            "twitter": "https://twitter.com/alice"
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::OK);
    let created: Value = created.json();

    let updated = with_token(server.post("/api/profile"), &token)
        .json(&json!({
            "status": "Senior Developer",
            "skills": ["rust"],
            "youtube": "https://youtube.com/alice"
        }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let updated: Value = updated.json();

    assert_eq!(updated["_id"], created["_id"]);
    assert_eq!(updated["status"], json!("Senior Developer"));
    assert_eq!(updated["skills"], json!(["rust"]));
    assert_eq!(updated["company"], json!("Acme"));
    assert_eq!(
        updated["social"],
        json!({
            "twitter": "https://twitter.com/alice",
            "youtube": "https://youtube.com/alice"
        })
    );
}

#[tokio::test]
async fn test_profile_requires_status_and_skills() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let response = with_token(server.post("/api/profile"), &token)
        .json(&json!({ "company": "Acme" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["errors"],
        json!([
            { "msg": "Status is required", "param": "status" },
            { "msg": "Skills is required", "param": "skills" }
        ])
    );
}

#[tokio::test]
async fn test_public_profiles_are_populated() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;
    create_profile(&server, &token).await;
    let user_id = my_id(&server, &token).await;

    let all: Value = server.get("/api/profile").await.json();
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["user"]["name"], json!("Alice"));
    assert!(all[0]["user"]["avatar"].is_string());

    let one = server.get(&format!("/api/profile/user/{}", user_id)).await;
    assert_eq!(one.status_code(), StatusCode::OK);
    assert_eq!(one.json::<Value>()["user"]["name"], json!("Alice"));
}

#[tokio::test]
async fn test_profile_by_unknown_or_malformed_user() {
    let server = create_test_server();

    let unknown = server
        .get("/api/profile/user/6f1c2d4e-0000-4000-8000-000000000000")
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(unknown.json::<Value>(), json!({ "msg": "Profile not found" }));

    let malformed = server.get("/api/profile/user/not-an-id").await;
    assert_eq!(malformed.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(malformed.json::<Value>(), json!({ "msg": "Profile not found" }));
}

#[tokio::test]
async fn test_experience_add_then_remove_restores_list() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;
    create_profile(&server, &token).await;

    let first = with_token(server.put("/api/profile/experience"), &token)
        .json(&json!({ "title": "Intern", "company": "Acme", "from": "2018-06-01" }))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let before: Value = first.json();

    let added: Value = with_token(server.put("/api/profile/experience"), &token)
        .json(&json!({
            "title": "Engineer",
            "company": "Initech",
            "from": "2020-01-01",
            "current": true
        }))
        .await
        .json();
    let experience = added["experience"].as_array().unwrap();
    assert_eq!(experience.len(), 2);
    assert_eq!(experience[0]["title"], json!("Engineer"));
    let new_id = experience[0]["_id"].as_str().unwrap().to_string();

    let removed = with_token(
        server.delete(&format!("/api/profile/experience/{}", new_id)),
        &token,
    )
    .await;
    assert_eq!(removed.status_code(), StatusCode::OK);
    assert_eq!(removed.json::<Value>()["experience"], before["experience"]);
}

#[tokio::test]
async fn test_remove_unknown_experience_is_noop() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;
    let profile = create_profile(&server, &token).await;

    let response = with_token(server.delete("/api/profile/experience/not-an-id"), &token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["_id"], profile["_id"]);
}

#[tokio::test]
async fn test_experience_without_profile() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let response = with_token(server.put("/api/profile/experience"), &token)
        .json(&json!({ "title": "Engineer", "company": "Acme", "from": "2020-01-01" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_education_add_then_remove_restores_list() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;
    create_profile(&server, &token).await;

    let added = with_token(server.put("/api/profile/education"), &token)
        .json(&json!({
            "school": "MIT",
            "degree": "BSc",
            "fieldofstudy": "Computer Science",
            "from": "2014-09-01",
            "to": "2018-06-01"
        }))
        .await;
    assert_eq!(added.status_code(), StatusCode::OK);
    let added: Value = added.json();
    assert_eq!(added["education"][0]["to"], json!("2018-06-01"));
    let edu_id = added["education"][0]["_id"].as_str().unwrap().to_string();

    let removed: Value = with_token(
        server.delete(&format!("/api/profile/education/{}", edu_id)),
        &token,
    )
    .await
    .json();
    assert_eq!(removed["education"], json!([]));
}

#[tokio::test]
async fn test_education_validation() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;
    create_profile(&server, &token).await;

    let response = with_token(server.put("/api/profile/education"), &token)
        .json(&json!({ "school": "MIT" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_delete_profile_removes_user_and_keeps_posts() {
    let server = create_test_server();
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    create_profile(&server, &alice).await;
    crate::common::create_post(&server, &alice, "still here").await;

    let response = with_token(server.delete("/api/profile"), &alice).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "msg": "User deleted" }));

    let profiles: Value = server.get("/api/profile").await.json();
    assert_eq!(profiles, json!([]));

    let login = server
        .post("/api/auth")
        .json(&json!({ "email": "alice@example.com", "password": "secret123" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::BAD_REQUEST);

    let posts: Value = with_token(server.get("/api/posts"), &bob).await.json();
    assert_eq!(posts.as_array().unwrap().len(), 1);
}
