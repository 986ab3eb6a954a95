//! Comment request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `POST /api/comments` body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: Option<String>,
    pub article_id: Option<String>,
    pub user_id: Option<String>,
    /// Present when replying to another comment of the same article
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile of a commenter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

/// A reply inside an article thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentReply {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub user: CommentAuthor,
}

/// A top-level comment with its direct replies
///
/// Threads are one level deep. Replies to replies are reached through
/// `GET /api/comments/{id}/replies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub user: CommentAuthor,
    pub replies: Vec<CommentReply>,
}
