//! In-memory store
//!
//! Implements every repository over plain vectors behind one
//! `tokio::sync::RwLock`, mirroring the filters and orderings of the SQL in
//! each entity's `db.rs`. Timestamps handed out by one store are strictly
//! increasing, so "newest first" is deterministic even within a clock tick.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::article_tags::db::ArticleTagRepository;
use crate::backend::articles::db::{Article, ArticleChanges, ArticleRepository, NewArticle};
use crate::backend::comments::db::{Comment, CommentRepository, CommentWithAuthor, NewComment};
use crate::backend::tags::db::{Tag, TagRepository};
use crate::backend::users::db::{NewUser, User, UserChanges, UserRepository};
use crate::shared::blog::Pagination;

#[derive(Debug, Clone)]
struct Link {
    article_id: Uuid,
    tag_id: Uuid,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tags: Vec<Tag>,
    articles: Vec<Article>,
    links: Vec<Link>,
    comments: Vec<Comment>,
    last_tick: Option<DateTime<Utc>>,
}

impl Tables {
    /// Current time, pushed forward past the last value handed out
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_tick {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_tick = Some(next);
        next
    }

    fn tag_is_active(&self, id: Uuid) -> bool {
        self.tags.iter().any(|t| t.id == id && t.is_active())
    }

    fn article_is_active(&self, id: Uuid) -> bool {
        self.articles.iter().any(|a| a.id == id && a.is_active())
    }

    fn insert_links(&mut self, article_id: Uuid, tag_ids: &[Uuid]) {
        for &tag_id in tag_ids {
            let exists = self
                .links
                .iter()
                .any(|l| l.article_id == article_id && l.tag_id == tag_id);
            if !exists {
                self.links.push(Link {
                    article_id,
                    tag_id,
                    deleted_at: None,
                });
            }
        }
    }
}

/// Volatile store for tests and local experiments
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every row
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }
}

/// Newest first by creation time
fn newest_first<T>(rows: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    rows.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

fn paginate<T>(rows: Vec<T>, pagination: Pagination) -> (Vec<T>, i64) {
    let total = i64::try_from(rows.len()).unwrap_or(i64::MAX);
    let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
    let page = rows
        .into_iter()
        .skip(skip)
        .take(pagination.limit as usize)
        .collect();
    (page, total)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar: user.avatar,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: String) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_active(&self, pagination: Pagination) -> Result<(Vec<User>, i64), sqlx::Error> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.iter().filter(|u| u.is_active()).cloned().collect();
        newest_first(&mut users, |u| u.created_at);
        Ok(paginate(users, pagination))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id && u.is_active()) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(avatar) = changes.avatar {
            user.avatar = Some(avatar);
        }
        user.updated_at = now;
        Ok(Some(user.clone()))
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.deleted_at = deleted_at;
            user.updated_at = now;
            user.clone()
        }))
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn create(&self, name: String) -> Result<Tag, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let created = Tag {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.tags.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: String) -> Result<Option<Tag>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.tags.iter().find(|t| t.name == name).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Tag>, sqlx::Error> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables.tags.iter().filter(|t| t.is_active()).cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn update(&self, id: Uuid, name: String) -> Result<Option<Tag>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        Ok(tables
            .tags
            .iter_mut()
            .find(|t| t.id == id && t.is_active())
            .map(|tag| {
                tag.name = name;
                tag.updated_at = now;
                tag.clone()
            }))
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        Ok(tables.tags.iter_mut().find(|t| t.id == id).map(|tag| {
            tag.deleted_at = deleted_at;
            tag.updated_at = now;
            tag.clone()
        }))
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn create_with_tags(&self, article: NewArticle, tag_ids: Vec<Uuid>) -> Result<Article, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let created = Article {
            id: Uuid::new_v4(),
            title: article.title,
            content: article.content,
            image: article.image,
            author_id: article.author_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.articles.push(created.clone());
        tables.insert_links(created.id, &tag_ids);
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn list_active(&self, pagination: Pagination) -> Result<(Vec<Article>, i64), sqlx::Error> {
        let tables = self.tables.read().await;
        let mut articles: Vec<Article> = tables.articles.iter().filter(|a| a.is_active()).cloned().collect();
        newest_first(&mut articles, |a| a.created_at);
        Ok(paginate(articles, pagination))
    }

    async fn search(&self, term: String, pagination: Pagination) -> Result<(Vec<Article>, i64), sqlx::Error> {
        let tables = self.tables.read().await;
        let needle = term.to_lowercase();
        let author_matches = |author_id: Uuid| {
            tables
                .users
                .iter()
                .any(|u| u.id == author_id && u.name.to_lowercase().contains(&needle))
        };

        let mut articles: Vec<Article> = tables
            .articles
            .iter()
            .filter(|a| a.is_active())
            .filter(|a| a.title.to_lowercase().contains(&needle) || author_matches(a.author_id))
            .cloned()
            .collect();
        newest_first(&mut articles, |a| a.created_at);
        Ok(paginate(articles, pagination))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ArticleChanges,
        tag_ids: Option<Vec<Uuid>>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let Some(article) = tables.articles.iter_mut().find(|a| a.id == id && a.is_active()) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            article.title = title;
        }
        if let Some(content) = changes.content {
            article.content = content;
        }
        if let Some(image) = changes.image {
            article.image = Some(image);
        }
        article.updated_at = now;
        let updated = article.clone();

        if let Some(tag_ids) = tag_ids {
            tables.links.retain(|l| l.article_id != id);
            tables.insert_links(id, &tag_ids);
        }
        Ok(Some(updated))
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        Ok(tables.articles.iter_mut().find(|a| a.id == id).map(|article| {
            article.deleted_at = deleted_at;
            article.updated_at = now;
            article.clone()
        }))
    }
}

#[async_trait]
impl ArticleTagRepository for MemoryStore {
    async fn replace_tags(&self, article_id: Uuid, tag_ids: Vec<Uuid>) -> Result<(), sqlx::Error> {
        let mut tables = self.tables.write().await;
        tables.links.retain(|l| l.article_id != article_id);
        tables.insert_links(article_id, &tag_ids);
        Ok(())
    }

    async fn find_tags_by_article(&self, article_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables
            .links
            .iter()
            .filter(|l| l.article_id == article_id && l.deleted_at.is_none())
            .filter_map(|l| tables.tags.iter().find(|t| t.id == l.tag_id && t.is_active()))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_articles_by_tag(&self, tag_id: Uuid) -> Result<Vec<Article>, sqlx::Error> {
        let tables = self.tables.read().await;
        if !tables.tag_is_active(tag_id) {
            return Ok(Vec::new());
        }

        let mut articles: Vec<Article> = tables
            .links
            .iter()
            .filter(|l| l.tag_id == tag_id && l.deleted_at.is_none())
            .filter(|l| tables.article_is_active(l.article_id))
            .filter_map(|l| tables.articles.iter().find(|a| a.id == l.article_id))
            .cloned()
            .collect();
        newest_first(&mut articles, |a| a.created_at);
        Ok(articles)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, comment: NewComment) -> Result<Comment, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let created = Comment {
            id: Uuid::new_v4(),
            content: comment.content,
            article_id: comment.article_id,
            user_id: comment.user_id,
            parent_id: comment.parent_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.comments.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_top_level(&self, pagination: Pagination) -> Result<(Vec<Comment>, i64), sqlx::Error> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.parent_id.is_none() && c.is_active())
            .cloned()
            .collect();
        newest_first(&mut comments, |c| c.created_at);
        Ok(paginate(comments, pagination))
    }

    async fn list_replies(
        &self,
        parent_id: Uuid,
        pagination: Pagination,
    ) -> Result<(Vec<Comment>, i64), sqlx::Error> {
        let tables = self.tables.read().await;
        let mut replies: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.parent_id == Some(parent_id) && c.is_active())
            .cloned()
            .collect();
        replies.sort_by_key(|c| c.created_at);
        Ok(paginate(replies, pagination))
    }

    async fn list_thread(&self, article_id: Uuid) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let tables = self.tables.read().await;
        let live_root = |id: Uuid| {
            tables
                .comments
                .iter()
                .any(|p| p.id == id && p.parent_id.is_none() && p.is_active())
        };

        let mut rows: Vec<CommentWithAuthor> = tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id && c.is_active())
            .filter(|c| c.parent_id.is_none_or(live_root))
            .filter_map(|c| {
                let author = tables.users.iter().find(|u| u.id == c.user_id)?;
                Some(CommentWithAuthor {
                    comment: c.clone(),
                    author_name: author.name.clone(),
                    author_avatar: author.avatar.clone(),
                })
            })
            .collect();
        rows.sort_by_key(|row| row.comment.created_at);
        Ok(rows)
    }

    async fn update_content(&self, id: Uuid, content: String) -> Result<Option<Comment>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        Ok(tables
            .comments
            .iter_mut()
            .find(|c| c.id == id && c.is_active())
            .map(|comment| {
                comment.content = content;
                comment.updated_at = now;
                comment.clone()
            }))
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        Ok(tables.comments.iter_mut().find(|c| c.id == id).map(|comment| {
            comment.deleted_at = deleted_at;
            comment.updated_at = now;
            comment.clone()
        }))
    }
}
