//! Blog domain DTOs
//!
//! Request bodies and response payloads shared by the server and its tests.
//! Request fields are optional at the type level so that absent fields are
//! reported by the request schemas as field errors rather than as a rejected
//! JSON body. All JSON names are camelCase.

pub mod article;
pub mod comment;
pub mod pagination;
pub mod tag;
pub mod user;

pub use article::{ArticleResponse, ArticleSummary, CreateArticleRequest, SearchQuery, UpdateArticleRequest};
pub use comment::{CommentAuthor, CommentReply, CommentResponse, CommentThread, CreateCommentRequest, UpdateCommentRequest};
pub use pagination::{Page, Pagination, PaginationQuery};
pub use tag::{CreateTagRequest, TagResponse, UpdateTagRequest};
pub use user::{CreateUserRequest, LoginRequest, UpdateUserRequest, UserResponse};
