/**
 * Application State Management
 *
 * `AppState` holds one instance of every service. The `FromRef`
 * implementations let each handler extract only the service it needs with
 * `State<XService>`.
 *
 * # Example
 *
 * ```rust,no_run
 * use std::sync::Arc;
 * use blog_api::backend::auth::PasswordHasher;
 * use blog_api::backend::server::state::AppState;
 * use blog_api::backend::store::MemoryStore;
 *
 * let state = AppState::new(Arc::new(MemoryStore::new()), PasswordHasher::new(4));
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::article_tags::db::ArticleTagRepository;
use crate::backend::article_tags::service::ArticleTagService;
use crate::backend::articles::db::ArticleRepository;
use crate::backend::articles::service::ArticleService;
use crate::backend::auth::{AuthService, PasswordHasher};
use crate::backend::comments::db::CommentRepository;
use crate::backend::comments::service::CommentService;
use crate::backend::store::BlogStore;
use crate::backend::tags::db::TagRepository;
use crate::backend::tags::service::TagService;
use crate::backend::users::db::UserRepository;
use crate::backend::users::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub auth: AuthService,
    pub tags: TagService,
    pub articles: ArticleService,
    pub comments: CommentService,
}

impl AppState {
    /// Wire every service to the same store
    pub fn new<S: BlogStore>(store: Arc<S>, hasher: PasswordHasher) -> Self {
        let users: Arc<dyn UserRepository> = store.clone();
        let tags: Arc<dyn TagRepository> = store.clone();
        let articles: Arc<dyn ArticleRepository> = store.clone();
        let links: Arc<dyn ArticleTagRepository> = store.clone();
        let comments: Arc<dyn CommentRepository> = store;

        let article_tags = ArticleTagService::new(tags.clone(), links);

        Self {
            users: UserService::new(users.clone(), hasher),
            auth: AuthService::new(users.clone(), hasher),
            tags: TagService::new(tags, article_tags.clone()),
            articles: ArticleService::new(articles.clone(), users.clone(), article_tags),
            comments: CommentService::new(comments, users, articles),
        }
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for TagService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tags.clone()
    }
}

impl FromRef<AppState> for ArticleService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.articles.clone()
    }
}

impl FromRef<AppState> for CommentService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.comments.clone()
    }
}
