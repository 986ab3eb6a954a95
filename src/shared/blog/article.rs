//! Article request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tag::TagResponse;

/// `POST /api/articles` body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub author_id: Option<String>,
    /// Between one and three tag IDs
    pub tag_ids: Option<Vec<String>>,
}

/// `PUT /api/articles/{id}` body
///
/// When `tagIds` is present the article's tag set is replaced by it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub tag_ids: Option<Vec<String>>,
}

/// `GET /api/articles/search` query
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchQuery {
    pub term: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Article with its live tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author_id: Uuid,
    pub tags: Vec<TagResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Article without content or tags, used in tag listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}
