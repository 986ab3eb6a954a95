/**
 * Article Model and Database Operations
 *
 * Creation writes the article row and its tag links in one transaction, so a
 * reader never sees a new article without tags. An update that also replaces
 * the tag set commits both or neither.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::article_tags::db::{delete_links, insert_links};
use crate::backend::store::{contains_pattern, PgStore};
use crate::backend::tags::db::Tag;
use crate::shared::blog::{ArticleResponse, ArticleSummary, Pagination, TagResponse};

/// Article row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Response payload carrying the given tags
    pub fn into_response(self, tags: Vec<Tag>) -> ArticleResponse {
        ArticleResponse {
            id: self.id,
            title: self.title,
            content: self.content,
            image: self.image,
            author_id: self.author_id,
            tags: tags.into_iter().map(TagResponse::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Article> for ArticleSummary {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            image: article.image,
            author_id: article.author_id,
            created_at: article.created_at,
        }
    }
}

/// Values for a new article row
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author_id: Uuid,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert an article and link it to `tag_ids` atomically
    async fn create_with_tags(&self, article: NewArticle, tag_ids: Vec<Uuid>) -> Result<Article, sqlx::Error>;

    /// Find by ID, including deleted articles
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, sqlx::Error>;

    /// Active articles, newest first, with the total active count
    async fn list_active(&self, pagination: Pagination) -> Result<(Vec<Article>, i64), sqlx::Error>;

    /// Active articles whose title or author name contains `term`, ignoring case
    async fn search(&self, term: String, pagination: Pagination) -> Result<(Vec<Article>, i64), sqlx::Error>;

    /// Apply `changes` to an active article and, when `tag_ids` is given,
    /// replace its links in the same transaction
    async fn update(
        &self,
        id: Uuid,
        changes: ArticleChanges,
        tag_ids: Option<Vec<Uuid>>,
    ) -> Result<Option<Article>, sqlx::Error>;

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Article>, sqlx::Error>;
}

const ARTICLE_COLUMNS: &str =
    "a.id, a.title, a.content, a.image, a.author_id, a.created_at, a.updated_at, a.deleted_at";

#[async_trait]
impl ArticleRepository for PgStore {
    async fn create_with_tags(&self, article: NewArticle, tag_ids: Vec<Uuid>) -> Result<Article, sqlx::Error> {
        let mut tx = self.pool().begin().await?;

        let created = sqlx::query_as::<_, Article>(&format!(
            r#"
            INSERT INTO articles AS a (id, title, content, image, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.image)
        .bind(article.author_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        insert_links(&mut *tx, created.id, &tag_ids).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(&format!("SELECT {ARTICLE_COLUMNS} FROM articles a WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn list_active(&self, pagination: Pagination) -> Result<(Vec<Article>, i64), sqlx::Error> {
        let articles = sqlx::query_as::<_, Article>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS}
            FROM articles a
            WHERE a.deleted_at IS NULL
            ORDER BY a.created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(pagination.limit_i64())
        .bind(pagination.offset())
        .fetch_all(self.pool())
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles WHERE deleted_at IS NULL")
            .fetch_one(self.pool())
            .await?;

        Ok((articles, total))
    }

    async fn search(&self, term: String, pagination: Pagination) -> Result<(Vec<Article>, i64), sqlx::Error> {
        let pattern = contains_pattern(&term);
        let filter = r#"
            FROM articles a
            JOIN users u ON u.id = a.author_id
            WHERE a.deleted_at IS NULL
              AND (a.title ILIKE $1 OR u.name ILIKE $1)
        "#;

        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {ARTICLE_COLUMNS} {filter} ORDER BY a.created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(&pattern)
        .bind(pagination.limit_i64())
        .bind(pagination.offset())
        .fetch_all(self.pool())
        .await?;

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) {filter}"))
            .bind(&pattern)
            .fetch_one(self.pool())
            .await?;

        Ok((articles, total))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ArticleChanges,
        tag_ids: Option<Vec<Uuid>>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let mut tx = self.pool().begin().await?;

        let updated = sqlx::query_as::<_, Article>(&format!(
            r#"
            UPDATE articles AS a
            SET title = COALESCE($2, a.title),
                content = COALESCE($3, a.content),
                image = COALESCE($4, a.image),
                updated_at = $5
            WHERE a.id = $1 AND a.deleted_at IS NULL
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(&changes.image)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(article) = updated else {
            return Ok(None);
        };

        if let Some(tag_ids) = tag_ids {
            delete_links(&mut *tx, id).await?;
            insert_links(&mut *tx, id, &tag_ids).await?;
        }
        tx.commit().await?;

        Ok(Some(article))
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(&format!(
            r#"
            UPDATE articles AS a
            SET deleted_at = $2, updated_at = $3
            WHERE a.id = $1
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(deleted_at)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
    }
}
