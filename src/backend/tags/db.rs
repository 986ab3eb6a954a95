/**
 * Tag Model and Database Operations
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::store::PgStore;
use crate::shared::blog::TagResponse;

/// Tag row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Tag {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create(&self, name: String) -> Result<Tag, sqlx::Error>;

    /// Find by ID, including deactivated tags
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, sqlx::Error>;

    /// Exact-name lookup, including deactivated tags
    async fn find_by_name(&self, name: String) -> Result<Option<Tag>, sqlx::Error>;

    /// Every active tag, ordered by name
    async fn list_active(&self) -> Result<Vec<Tag>, sqlx::Error>;

    /// Rename an active tag
    async fn update(&self, id: Uuid, name: String) -> Result<Option<Tag>, sqlx::Error>;

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Tag>, sqlx::Error>;
}

const TAG_COLUMNS: &str = "id, name, created_at, updated_at, deleted_at";

#[async_trait]
impl TagRepository for PgStore {
    async fn create(&self, name: String) -> Result<Tag, sqlx::Error> {
        sqlx::query_as::<_, Tag>(&format!(
            r#"
            INSERT INTO tags (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING {TAG_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&name)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(&format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn find_by_name(&self, name: String) -> Result<Option<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(&format!("SELECT {TAG_COLUMNS} FROM tags WHERE name = $1"))
            .bind(&name)
            .fetch_optional(self.pool())
            .await
    }

    async fn list_active(&self) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(&format!(
            "SELECT {TAG_COLUMNS} FROM tags WHERE deleted_at IS NULL ORDER BY name"
        ))
        .fetch_all(self.pool())
        .await
    }

    async fn update(&self, id: Uuid, name: String) -> Result<Option<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(&format!(
            r#"
            UPDATE tags
            SET name = $2, updated_at = $3
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {TAG_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&name)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(&format!(
            "UPDATE tags SET deleted_at = $2, updated_at = $3 WHERE id = $1 RETURNING {TAG_COLUMNS}"
        ))
        .bind(id)
        .bind(deleted_at)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
    }
}
