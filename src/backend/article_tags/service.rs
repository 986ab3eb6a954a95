/**
 * Article-Tag Service
 *
 * Owns the many-to-many relation between articles and tags. It has no HTTP
 * surface of its own: the article and tag services call it.
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::article_tags::db::ArticleTagRepository;
use crate::backend::error::fault;
use crate::backend::tags::db::{Tag, TagRepository};
use crate::shared::blog::{ArticleSummary, TagResponse};
use crate::shared::error::ApplicationException;
use crate::shared::result::ApiResult;

#[derive(Clone)]
pub struct ArticleTagService {
    tags: Arc<dyn TagRepository>,
    links: Arc<dyn ArticleTagRepository>,
}

impl ArticleTagService {
    pub fn new(tags: Arc<dyn TagRepository>, links: Arc<dyn ArticleTagRepository>) -> Self {
        Self { tags, links }
    }

    /// Replace an article's tag set
    ///
    /// Every tag must exist and be active; the first missing one is reported
    /// as `NOT_FOUND` and nothing is changed. Returns the new tag set.
    pub async fn sync_article_tags(&self, article_id: Uuid, tag_ids: Vec<Uuid>) -> ApiResult<Vec<TagResponse>> {
        self.sync(article_id, tag_ids).await.map_or_else(ApiResult::from, |tags| {
            ApiResult::ok(tags.into_iter().map(TagResponse::from).collect())
                .with_message("Tags sincronizadas com sucesso")
        })
    }

    pub async fn get_tags_by_article(&self, article_id: Uuid) -> ApiResult<Vec<TagResponse>> {
        self.tags_of(article_id).await.map_or_else(ApiResult::from, |tags| {
            ApiResult::ok(tags.into_iter().map(TagResponse::from).collect())
                .with_message("Tags do artigo encontradas com sucesso")
        })
    }

    pub async fn get_articles_by_tag(&self, tag_id: Uuid) -> ApiResult<Vec<ArticleSummary>> {
        match self.links.find_articles_by_tag(tag_id).await {
            Ok(articles) => ApiResult::ok(articles.into_iter().map(ArticleSummary::from).collect())
                .with_message("Artigos da tag encontrados com sucesso"),
            Err(err) => fault("Erro ao buscar artigos da tag")(err).into(),
        }
    }

    pub(crate) async fn sync(&self, article_id: Uuid, tag_ids: Vec<Uuid>) -> Result<Vec<Tag>, ApplicationException> {
        const CONTEXT: &str = "Erro ao sincronizar tags do artigo";

        self.ensure_tags_exist(&tag_ids, CONTEXT).await?;
        self.links
            .replace_tags(article_id, tag_ids)
            .await
            .map_err(fault(CONTEXT))?;

        tracing::info!(%article_id, "Article tags synchronized");
        self.links
            .find_tags_by_article(article_id)
            .await
            .map_err(fault(CONTEXT))
    }

    pub(crate) async fn tags_of(&self, article_id: Uuid) -> Result<Vec<Tag>, ApplicationException> {
        self.links
            .find_tags_by_article(article_id)
            .await
            .map_err(fault("Erro ao buscar tags do artigo"))
    }

    /// `NOT_FOUND` for the first ID that is unknown or deactivated
    pub(crate) async fn ensure_tags_exist(
        &self,
        tag_ids: &[Uuid],
        context: &'static str,
    ) -> Result<(), ApplicationException> {
        for &tag_id in tag_ids {
            let tag = self.tags.find_by_id(tag_id).await.map_err(fault(context))?;
            if !tag.is_some_and(|t| t.is_active()) {
                tracing::warn!(%tag_id, "Tag not found");
                return Err(ApplicationException::not_found(format!(
                    "Tag com ID {tag_id} não encontrada"
                )));
            }
        }
        Ok(())
    }
}
