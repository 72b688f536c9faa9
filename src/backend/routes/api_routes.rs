/**
 * API Routes
 *
 * This module maps the `/api` prefixes to their handler families.
 *
 * # Routes
 *
 * ## Users / Auth
 * - `POST /api/users` - Register
 * - `POST /api/auth` - Login
 * - `GET /api/auth` - Current user (token)
 *
 * ## Profile
 * - `GET /api/profile`, `POST /api/profile` (token), `DELETE /api/profile` (token)
 * - `GET /api/profile/me` (token)
 * - `GET /api/profile/user/{user_id}`
 * - `PUT /api/profile/experience`, `DELETE /api/profile/experience/{exp_id}` (token)
 * - `PUT /api/profile/education`, `DELETE /api/profile/education/{edu_id}` (token)
 *
 * ## Posts (all token)
 * - `POST /api/posts`, `GET /api/posts`
 * - `GET /api/posts/{id}`, `DELETE /api/posts/{id}`
 * - `PUT /api/posts/like/{id}`, `PUT /api/posts/unlike/{id}`
 * - `POST /api/posts/comment/{id}`, `DELETE /api/posts/comment/{id}/{comment_id}`
 *
 * # Authentication
 *
 * The posts router is wrapped in `auth_middleware` as a whole. Profile
 * and auth routes mix public and private endpoints, so their private
 * handlers take the `AuthUser` extractor instead.
 */

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::posts;
use crate::backend::profile;
use crate::backend::server::state::AppState;

/// Add the `/api` routes to `router`
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        .nest("/api/users", user_routes())
        .nest("/api/auth", auth_routes())
        .nest("/api/profile", profile_routes())
        .nest("/api/posts", post_routes(app_state))
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(register))
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/", get(get_me).post(login))
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(profile::list_profiles)
                .post(profile::upsert_profile)
                .delete(profile::delete_profile),
        )
        .route("/me", get(profile::get_my_profile))
        .route("/user/{user_id}", get(profile::get_profile_by_user))
        .route("/experience", put(profile::add_experience))
        .route("/experience/{exp_id}", delete(profile::remove_experience))
        .route("/education", put(profile::add_education))
        .route("/education/{edu_id}", delete(profile::remove_education))
}

fn post_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/{id}", get(posts::get_post).delete(posts::delete_post))
        .route("/like/{id}", put(posts::like_post))
        .route("/unlike/{id}", put(posts::unlike_post))
        .route("/comment/{id}", post(posts::add_comment))
        .route("/comment/{id}/{comment_id}", delete(posts::delete_comment))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
}
