/**
 * API Routes
 *
 * Every `/api` endpoint, grouped by entity. Handlers extract their service
 * from `AppState` through `FromRef`.
 *
 * # Routes
 *
 * ## Users
 * - `POST /api/users`, `GET /api/users`
 * - `GET|PUT|DELETE /api/users/{id}`
 * - `POST /api/users/{id}/reactivate`
 *
 * ## Auth
 * - `POST /api/auth/login`
 *
 * ## Tags
 * - `POST /api/tags`, `GET /api/tags`
 * - `GET|PUT|DELETE /api/tags/{id}`
 * - `GET /api/tags/{id}/articles`
 *
 * ## Articles
 * - `POST /api/articles`, `GET /api/articles`, `GET /api/articles/search`
 * - `GET|PUT|DELETE /api/articles/{id}`
 * - `GET /api/articles/{id}/tags`, `GET /api/articles/{id}/comments`
 *
 * ## Comments
 * - `POST /api/comments`, `GET /api/comments`
 * - `GET|PUT|DELETE /api/comments/{id}`
 * - `GET /api/comments/{id}/replies`
 */

use axum::routing::{get, post};
use axum::Router;

use crate::backend::articles::handlers::{
    create_article, delete_article, get_article, get_article_tags, list_articles, search_articles,
    update_article,
};
use crate::backend::auth::handlers::login;
use crate::backend::comments::handlers::{
    create_comment, delete_comment, get_article_comments, get_comment, get_replies, list_comments,
    update_comment,
};
use crate::backend::server::state::AppState;
use crate::backend::tags::handlers::{create_tag, delete_tag, get_tag, get_tag_articles, list_tags, update_tag};
use crate::backend::users::handlers::{
    create_user, delete_user, get_user, list_users, reactivate_user, update_user,
};

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .merge(user_routes())
        .merge(auth_routes())
        .merge(tag_routes())
        .merge(article_routes())
        .merge(comment_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_user).get(list_users))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/{id}/reactivate", post(reactivate_user))
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/api/tags", post(create_tag).get(list_tags))
        .route("/api/tags/{id}", get(get_tag).put(update_tag).delete(delete_tag))
        .route("/api/tags/{id}/articles", get(get_tag_articles))
}

fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/api/articles", post(create_article).get(list_articles))
        .route("/api/articles/search", get(search_articles))
        .route(
            "/api/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/api/articles/{id}/tags", get(get_article_tags))
        .route("/api/articles/{id}/comments", get(get_article_comments))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/comments", post(create_comment).get(list_comments))
        .route(
            "/api/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route("/api/comments/{id}/replies", get(get_replies))
}
