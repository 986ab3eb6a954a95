/**
 * Article-Tag Link Database Operations
 *
 * Links are rows of `article_tags`. A link is live when the link, its tag, and
 * its article are all not soft-deleted.
 */

use async_trait::async_trait;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::backend::articles::db::Article;
use crate::backend::store::PgStore;
use crate::backend::tags::db::Tag;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleTagRepository: Send + Sync {
    /// Replace every link of `article_id` with links to `tag_ids` in one transaction
    async fn replace_tags(&self, article_id: Uuid, tag_ids: Vec<Uuid>) -> Result<(), sqlx::Error>;

    /// Live tags of an article, ordered by name
    async fn find_tags_by_article(&self, article_id: Uuid) -> Result<Vec<Tag>, sqlx::Error>;

    /// Live articles carrying a tag, newest first
    async fn find_articles_by_tag(&self, tag_id: Uuid) -> Result<Vec<Article>, sqlx::Error>;
}

/// Remove every link of an article on an open connection or transaction
pub(crate) async fn delete_links(conn: &mut PgConnection, article_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
        .bind(article_id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Insert one link per tag on an open connection or transaction
pub(crate) async fn insert_links(
    conn: &mut PgConnection,
    article_id: Uuid,
    tag_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO article_tags (article_id, tag_id)
        SELECT $1, tag_id FROM UNNEST($2::uuid[]) AS t(tag_id)
        ON CONFLICT (article_id, tag_id) DO NOTHING
        "#,
    )
    .bind(article_id)
    .bind(tag_ids)
    .execute(conn)
    .await?;

    Ok(())
}

#[async_trait]
impl ArticleTagRepository for PgStore {
    async fn replace_tags(&self, article_id: Uuid, tag_ids: Vec<Uuid>) -> Result<(), sqlx::Error> {
        let mut tx = self.pool().begin().await?;

        delete_links(&mut *tx, article_id).await?;
        insert_links(&mut *tx, article_id, &tag_ids).await?;
        tx.commit().await?;

        tracing::debug!(%article_id, count = tag_ids.len(), "Article tags replaced");
        Ok(())
    }

    async fn find_tags_by_article(&self, article_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.created_at, t.updated_at, t.deleted_at
            FROM article_tags l
            JOIN tags t ON t.id = l.tag_id
            WHERE l.article_id = $1
              AND l.deleted_at IS NULL
              AND t.deleted_at IS NULL
            ORDER BY t.name
            "#,
        )
        .bind(article_id)
        .fetch_all(self.pool())
        .await
    }

    async fn find_articles_by_tag(&self, tag_id: Uuid) -> Result<Vec<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT a.id, a.title, a.content, a.image, a.author_id, a.created_at, a.updated_at, a.deleted_at
            FROM article_tags l
            JOIN articles a ON a.id = l.article_id
            WHERE l.tag_id = $1
              AND l.deleted_at IS NULL
              AND a.deleted_at IS NULL
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(tag_id)
        .fetch_all(self.pool())
        .await
    }
}
