/**
 * User Model and Database Operations
 *
 * `User` is the stored row. `UserRepository` is the persistence contract the
 * user, auth, article, and comment services depend on; every method returns
 * plain values or `None` and leaves business rules to the services.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::store::PgStore;
use crate::shared::blog::{Pagination, UserResponse};

/// User row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never returned to clients
    pub password_hash: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
            updated_at: user.updated_at,
            deleted_at: user.deleted_at,
        }
    }
}

/// Values for a new user row
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

/// Partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, sqlx::Error>;

    /// Find by ID, including deactivated users
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error>;

    /// Find by email, including deactivated users
    async fn find_by_email(&self, email: String) -> Result<Option<User>, sqlx::Error>;

    /// Active users, newest first, with the total active count
    async fn list_active(&self, pagination: Pagination) -> Result<(Vec<User>, i64), sqlx::Error>;

    /// Apply changes to an active user
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, sqlx::Error>;

    /// Set or clear the soft-delete timestamp
    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<User>, sqlx::Error>;
}

const USER_COLUMNS: &str = "id, name, email, password_hash, avatar, created_at, updated_at, deleted_at";

#[async_trait]
impl UserRepository for PgStore {
    async fn create(&self, user: NewUser) -> Result<User, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, avatar, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar)
        .bind(now)
        .fetch_one(self.pool())
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn find_by_email(&self, email: String) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(&email)
            .fetch_optional(self.pool())
            .await
    }

    async fn list_active(&self, pagination: Pagination) -> Result<(Vec<User>, i64), sqlx::Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(pagination.limit_i64())
        .bind(pagination.offset())
        .fetch_all(self.pool())
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
            .fetch_one(self.pool())
            .await?;

        Ok((users, total))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                avatar = COALESCE($4, avatar),
                updated_at = $5
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.avatar)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET deleted_at = $2, updated_at = $3
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(deleted_at)
        .bind(Utc::now())
        .fetch_optional(self.pool())
        .await
    }
}
