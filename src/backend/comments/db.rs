/**
 * Comment Model and Database Operations
 *
 * Comments form a tree through `parent_id`. A reply always belongs to the same
 * article as its parent; the service enforces that before inserting. The
 * article view only reads two levels of that tree: top-level comments and
 * their direct replies.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::store::PgStore;
use crate::shared::blog::{CommentAuthor, CommentReply, CommentResponse, Pagination};

/// Comment row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            article_id: comment.article_id,
            user_id: comment.user_id,
            parent_id: comment.parent_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Comment row joined with its author's public profile
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub author_name: String,
    pub author_avatar: Option<String>,
}

impl CommentWithAuthor {
    pub fn author(&self) -> CommentAuthor {
        CommentAuthor {
            id: self.comment.user_id,
            name: self.author_name.clone(),
            avatar: self.author_avatar.clone(),
        }
    }
}

impl From<CommentWithAuthor> for CommentReply {
    fn from(row: CommentWithAuthor) -> Self {
        Self {
            user: row.author(),
            comment: row.comment.into(),
        }
    }
}

/// Values for a new comment row
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub content: String,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment, sqlx::Error>;

    /// Find by ID, including deleted comments
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, sqlx::Error>;

    /// Active top-level comments, newest first, with their total count
    async fn list_top_level(&self, pagination: Pagination) -> Result<(Vec<Comment>, i64), sqlx::Error>;

    /// Active direct replies of a comment, oldest first, with their total count
    async fn list_replies(
        &self,
        parent_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Comment>, i64), sqlx::Error>;

    /// Active top-level comments of an article and the active direct replies
    /// of those, oldest first, with their authors
    async fn list_thread(&self, article_id: Uuid) -> Result<Vec<CommentWithAuthor>, sqlx::Error>;

    async fn update_content(&self, id: Uuid, content: String) -> Result<Option<Comment>, sqlx::Error>;

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Comment>, sqlx::Error>;
}

const COMMENT_COLUMNS: &str = "id, content, article_id, user_id, parent_id, created_at, updated_at, deleted_at";

#[async_trait]
impl CommentRepository for PgStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO comments (id, content, article_id, user_id, parent_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&comment.content)
        .bind(comment.article_id)
        .bind(comment.user_id)
        .bind(comment.parent_id)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn list_top_level(&self, pagination: Pagination) -> Result<(Vec<Comment>, i64), sqlx::Error> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE parent_id IS NULL AND deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(pagination.limit_i64())
        .bind(pagination.offset())
        .fetch_all(self.pool())
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE parent_id IS NULL AND deleted_at IS NULL",
        )
        .fetch_one(self.pool())
        .await?;

        Ok((comments, total))
    }

    async fn list_replies(
        &self,
        parent_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Comment>, i64), sqlx::Error> {
        let replies = sqlx::query_as::<_, Comment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE parent_id = $1 AND deleted_at IS NULL
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(parent_id)
        .bind(pagination.limit_i64())
        .bind(pagination.offset())
        .fetch_all(self.pool())
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE parent_id = $1 AND deleted_at IS NULL",
        )
        .bind(parent_id)
        .fetch_one(self.pool())
        .await?;

        Ok((replies, total))
    }

    async fn list_thread(&self, article_id: Uuid) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.article_id, c.user_id, c.parent_id,
                   c.created_at, c.updated_at, c.deleted_at,
                   u.name AS author_name, u.avatar AS author_avatar
            FROM comments c
            JOIN users u ON u.id = c.user_id
            LEFT JOIN comments p ON p.id = c.parent_id
            WHERE c.article_id = $1
              AND c.deleted_at IS NULL
              AND (c.parent_id IS NULL OR (p.parent_id IS NULL AND p.deleted_at IS NULL))
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(article_id)
        .fetch_all(self.pool())
        .await
    }

    async fn update_content(&self, id: Uuid, content: String) -> Result<Option<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE comments
            SET content = $2, updated_at = $3
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&content)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE comments
            SET deleted_at = $2, updated_at = $3
            WHERE id = $1
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(deleted_at)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
    }
}
