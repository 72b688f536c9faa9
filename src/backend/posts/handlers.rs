/**
 * Post Handlers
 *
 * HTTP handlers for /api/posts. Every route here sits behind the auth
 * middleware.
 *
 * # Endpoints
 *
 * - `POST /api/posts` - create a post
 * - `GET /api/posts` - all posts, newest first
 * - `GET /api/posts/{id}` - one post
 * - `DELETE /api/posts/{id}` - delete own post
 * - `PUT /api/posts/like/{id}` - like a post
 * - `PUT /api/posts/unlike/{id}` - remove own like
 * - `POST /api/posts/comment/{id}` - comment on a post
 * - `DELETE /api/posts/comment/{id}/{comment_id}` - delete own comment
 *
 * Likes and comments are read-modify-write updates on the post document
 * and are retried when a concurrent write gets in first.
 */

use axum::extract::{Path, State};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::middleware::AuthUser;
use crate::backend::posts::types::{CommentRequest, PostRequest};
use crate::backend::store::Database;
use crate::shared::models::{Comment, Like, Post, User};

pub const POST_NOT_FOUND_MESSAGE: &str = "Post not found";
pub const NOT_AUTHORIZED_MESSAGE: &str = "User not authorized";
pub const ALREADY_LIKED_MESSAGE: &str = "Post already liked";
pub const NOT_LIKED_MESSAGE: &str = "Post has not yet been liked";
pub const COMMENT_NOT_FOUND_MESSAGE: &str = "Comment does not exist";

fn post_not_found() -> BackendError {
    BackendError::not_found(POST_NOT_FOUND_MESSAGE)
}

/// Post id from the path; a malformed id addresses no post
fn parse_post_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| post_not_found())
}

async fn requester(db: &Database, auth: AuthUser) -> Result<User, BackendError> {
    db.users.find_by_id(auth.id()).await?.ok_or_else(|| {
        tracing::warn!("Token for deleted user: {}", auth.id());
        BackendError::not_found("User not found")
    })
}

/// Read-modify-write a post, 404 if it does not exist
async fn update_post<F>(db: &Database, post_id: Uuid, mutate: F) -> Result<Post, BackendError>
where
    F: FnMut(&mut Post) -> Result<(), BackendError> + Send,
{
    db.posts.update(post_id, mutate).await?.ok_or_else(post_not_found)
}

/// POST /api/posts
pub async fn create_post(
    auth: AuthUser,
    State(db): State<Database>,
    Json(request): Json<PostRequest>,
) -> Result<Json<Post>, BackendError> {
    let text = request
        .into_text()
        .inspect_err(|e| tracing::warn!("Post rejected: {}", e))?;
    let author = requester(&db, auth).await?;

    let post = db.posts.create(Post::new(&author, text)).await?;
    tracing::info!("Post {} created by user: {}", post.id, author.id);
    Ok(Json(post))
}

/// GET /api/posts
pub async fn list_posts(State(db): State<Database>) -> Result<Json<Vec<Post>>, BackendError> {
    let mut posts = db.posts.list().await?;
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(Json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(db): State<Database>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, BackendError> {
    let post_id = parse_post_id(&post_id)?;
    db.posts
        .find_by_id(post_id)
        .await?
        .map(Json)
        .ok_or_else(post_not_found)
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    auth: AuthUser,
    State(db): State<Database>,
    Path(post_id): Path<String>,
) -> Result<Json<Value>, BackendError> {
    let post_id = parse_post_id(&post_id)?;
    let post = db.posts.find_by_id(post_id).await?.ok_or_else(post_not_found)?;

    if post.user != auth.id() {
        tracing::warn!("User {} tried to delete post {} of {}", auth.id(), post.id, post.user);
        return Err(BackendError::unauthorized(NOT_AUTHORIZED_MESSAGE));
    }

    db.posts.delete(post_id).await?;
    tracing::info!("Post {} removed", post_id);
    Ok(Json(json!({ "msg": "Post removed" })))
}

/// PUT /api/posts/like/{id}
pub async fn like_post(
    auth: AuthUser,
    State(db): State<Database>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Like>>, BackendError> {
    let post_id = parse_post_id(&post_id)?;
    let post = update_post(&db, post_id, |post: &mut Post| {
        if post.like(auth.id()) {
            Ok(())
        } else {
            Err(BackendError::bad_request(ALREADY_LIKED_MESSAGE))
        }
    })
    .await
    .inspect_err(|e| tracing::warn!("Like rejected: {}", e))?;

    Ok(Json(post.likes))
}

/// PUT /api/posts/unlike/{id}
pub async fn unlike_post(
    auth: AuthUser,
    State(db): State<Database>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Like>>, BackendError> {
    let post_id = parse_post_id(&post_id)?;
    let post = update_post(&db, post_id, |post: &mut Post| {
        if post.unlike(auth.id()) {
            Ok(())
        } else {
            Err(BackendError::bad_request(NOT_LIKED_MESSAGE))
        }
    })
    .await
    .inspect_err(|e| tracing::warn!("Unlike rejected: {}", e))?;

    Ok(Json(post.likes))
}

/// POST /api/posts/comment/{id}
///
/// The commenter's name comes from their user record, the avatar from the
/// request body.
pub async fn add_comment(
    auth: AuthUser,
    State(db): State<Database>,
    Path(post_id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> Result<Json<Vec<Comment>>, BackendError> {
    let (text, avatar) = request
        .into_parts()
        .inspect_err(|e| tracing::warn!("Comment rejected: {}", e))?;
    let post_id = parse_post_id(&post_id)?;
    let author = requester(&db, auth).await?;

    let comment = Comment::new(author.id, text, author.name, avatar);
    let post = update_post(&db, post_id, |post: &mut Post| {
        post.add_comment(comment.clone());
        Ok(())
    })
    .await?;

    tracing::info!("Comment {} added to post {}", comment.id, post_id);
    Ok(Json(post.comments))
}

/// DELETE /api/posts/comment/{id}/{comment_id}
pub async fn delete_comment(
    auth: AuthUser,
    State(db): State<Database>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, BackendError> {
    let post_id = parse_post_id(&post_id)?;
    let comment_id = Uuid::parse_str(&comment_id)
        .map_err(|_| BackendError::not_found(COMMENT_NOT_FOUND_MESSAGE))?;

    let post = update_post(&db, post_id, |post: &mut Post| {
        let comment = post
            .find_comment(comment_id)
            .ok_or_else(|| BackendError::not_found(COMMENT_NOT_FOUND_MESSAGE))?;
        if comment.user != auth.id() {
            return Err(BackendError::unauthorized(NOT_AUTHORIZED_MESSAGE));
        }
        post.remove_comment(comment_id);
        Ok(())
    })
    .await
    .inspect_err(|e| tracing::warn!("Comment removal rejected: {}", e))?;

    tracing::info!("Comment {} removed from post {}", comment_id, post_id);
    Ok(Json(post.comments))
}
