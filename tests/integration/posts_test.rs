//! Posts API integration tests

use std::future::IntoFuture;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_post, create_test_server, register_user, with_token};

fn id_of(value: &Value) -> String {
    value["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_posts_require_token() {
    let server = create_test_server();

    let response = server.get("/api/posts").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "msg": "No token, authorization denied" })
    );
}

#[tokio::test]
async fn test_create_post_then_list() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let post = create_post(&server, &token, "hello").await;
    assert_eq!(post["name"], json!("Alice"));

    let posts: Value = with_token(server.get("/api/posts"), &token).await.json();
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["text"], json!("hello"));
    assert_eq!(posts[0]["likes"], json!([]));
    assert_eq!(posts[0]["comments"], json!([]));
}

#[tokio::test]
async fn test_posts_newest_first() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;
    create_post(&server, &token, "first").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_post(&server, &token, "second").await;

    let posts: Value = with_token(server.get("/api/posts"), &token).await.json();
    assert_eq!(posts[0]["text"], json!("second"));
    assert_eq!(posts[1]["text"], json!("first"));
}

#[tokio::test]
async fn test_post_text_required() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let response = with_token(server.post("/api/posts"), &token)
        .json(&json!({ "text": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "errors": [{ "msg": "Text is required", "param": "text" }] })
    );
}

#[tokio::test]
async fn test_get_post_not_found() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    for path in [
        "/api/posts/00000000-0000-4000-8000-000000000000",
        "/api/posts/bogus",
    ] {
        let response = with_token(server.get(path), &token).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!({ "msg": "Post not found" }));
    }
}

#[tokio::test]
async fn test_only_author_deletes_post() {
    let server = create_test_server();
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    let post_id = id_of(&create_post(&server, &alice, "mine").await);
    let path = format!("/api/posts/{}", post_id);

    let denied = with_token(server.delete(&path), &bob).await;
    assert_eq!(denied.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(denied.json::<Value>(), json!({ "msg": "User not authorized" }));
    assert_eq!(with_token(server.get(&path), &bob).await.status_code(), StatusCode::OK);

    let removed = with_token(server.delete(&path), &alice).await;
    assert_eq!(removed.status_code(), StatusCode::OK);
    assert_eq!(removed.json::<Value>(), json!({ "msg": "Post removed" }));
    assert_eq!(
        with_token(server.get(&path), &alice).await.status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_like_twice_rejected() {
    let server = create_test_server();
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    let post_id = id_of(&create_post(&server, &alice, "like me").await);
    let path = format!("/api/posts/like/{}", post_id);

    let first = with_token(server.put(&path), &bob).await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let likes: Value = first.json();
    assert_eq!(likes.as_array().unwrap().len(), 1);

    let second = with_token(server.put(&path), &bob).await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(second.json::<Value>(), json!({ "msg": "Post already liked" }));

    let post: Value = with_token(server.get(&format!("/api/posts/{}", post_id)), &bob)
        .await
        .json();
    assert_eq!(post["likes"], likes);
}

#[tokio::test]
async fn test_unlike_rules() {
    let server = create_test_server();
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let post_id = id_of(&create_post(&server, &alice, "like me").await);
    let unlike = format!("/api/posts/unlike/{}", post_id);

    let never_liked = with_token(server.put(&unlike), &alice).await;
    assert_eq!(never_liked.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        never_liked.json::<Value>(),
        json!({ "msg": "Post has not yet been liked" })
    );

    with_token(server.put(&format!("/api/posts/like/{}", post_id)), &alice).await;
    let response = with_token(server.put(&unlike), &alice).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_comment_add_and_delete() {
    let server = create_test_server();
    let alice = register_user(&server, "Alice", "alice@example.com").await;
    let bob = register_user(&server, "Bob", "bob@example.com").await;
    let post_id = id_of(&create_post(&server, &alice, "discuss").await);

    let added = with_token(server.post(&format!("/api/posts/comment/{}", post_id)), &bob)
        .json(&json!({ "text": "nice post", "avatar": "//img/bob" }))
        .await;
    assert_eq!(added.status_code(), StatusCode::OK);
    let comments: Value = added.json();
    assert_eq!(comments[0]["name"], json!("Bob"));
    assert_eq!(comments[0]["avatar"], json!("//img/bob"));
    let comment_id = id_of(&comments[0]);
    let path = format!("/api/posts/comment/{}/{}", post_id, comment_id);

    let denied = with_token(server.delete(&path), &alice).await;
    assert_eq!(denied.status_code(), StatusCode::UNAUTHORIZED);

    let removed = with_token(server.delete(&path), &bob).await;
    assert_eq!(removed.status_code(), StatusCode::OK);
    assert_eq!(removed.json::<Value>(), json!([]));

    let again = with_token(server.delete(&path), &bob).await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(again.json::<Value>(), json!({ "msg": "Comment does not exist" }));
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let server = create_test_server();
    let token = register_user(&server, "Alice", "alice@example.com").await;

    let response = with_token(
        server.post("/api/posts/comment/00000000-0000-4000-8000-000000000000"),
        &token,
    )
    .json(&json!({ "text": "hello?" }))
    .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_likes_all_recorded() {
    let server = create_test_server();
    let author = register_user(&server, "Author", "author@example.com").await;
    let post_id = id_of(&create_post(&server, &author, "popular").await);

    let mut tokens = Vec::new();
    for i in 0..4 {
        tokens.push(register_user(&server, "Fan", &format!("fan{}@example.com", i)).await);
    }

    let path = format!("/api/posts/like/{}", post_id);
    let like = |token: &String| with_token(server.put(&path), token).into_future();
    let (a, b, c, d) = tokio::join!(
        like(&tokens[0]),
        like(&tokens[1]),
        like(&tokens[2]),
        like(&tokens[3])
    );
    for response in [a, b, c, d] {
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let post: Value = with_token(server.get(&format!("/api/posts/{}", post_id)), &author)
        .await
        .json();
    assert_eq!(post["likes"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_unknown_route_404() {
    let server = create_test_server();

    let response = server.get("/api/unknown").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "msg": "Not Found" }));
}
