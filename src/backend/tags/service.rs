/**
 * Tag Service
 *
 * Tag names are unique across active and deactivated tags, matching the
 * unique index on `tags.name`.
 */

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::article_tags::service::ArticleTagService;
use crate::backend::error::{conflict_or_fault, fault};
use crate::backend::tags::db::{Tag, TagRepository};
use crate::shared::blog::{ArticleSummary, TagResponse};
use crate::shared::error::ApplicationException;
use crate::shared::result::ApiResult;

const TAG_NOT_FOUND: &str = "Tag não encontrada";
const NAME_TAKEN: &str = "Tag já cadastrada com esse nome";

#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn TagRepository>,
    article_tags: ArticleTagService,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>, article_tags: ArticleTagService) -> Self {
        Self { tags, article_tags }
    }

    pub async fn create(&self, name: String) -> ApiResult<TagResponse> {
        tracing::info!(%name, "Creating tag");

        self.try_create(name).await.map_or_else(ApiResult::from, |tag| {
            ApiResult::created(tag.into()).with_message("Tag registrada com sucesso")
        })
    }

    async fn try_create(&self, name: String) -> Result<Tag, ApplicationException> {
        const CONTEXT: &str = "Erro ao registrar tag";

        self.ensure_name_free(&name, None, CONTEXT).await?;
        self.tags
            .create(name)
            .await
            .map_err(conflict_or_fault(NAME_TAKEN, CONTEXT))
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<TagResponse> {
        self.find_active(id, "Erro ao buscar tag")
            .await
            .map_or_else(ApiResult::from, |tag| {
                ApiResult::ok(tag.into()).with_message("Tag encontrada com sucesso")
            })
    }

    pub async fn list(&self) -> ApiResult<Vec<TagResponse>> {
        match self.tags.list_active().await {
            Ok(tags) => ApiResult::ok(tags.into_iter().map(TagResponse::from).collect())
                .with_message("Tags buscadas com sucesso"),
            Err(err) => fault("Erro ao buscar tags")(err).into(),
        }
    }

    /// Rename an active tag
    ///
    /// # Errors
    ///
    /// * `NOT_FOUND` - unknown or deactivated tag
    /// * `CONFLICT` - another tag already has the name
    pub async fn update(&self, id: Uuid, name: String) -> ApiResult<TagResponse> {
        self.try_update(id, name).await.map_or_else(ApiResult::from, |tag| {
            ApiResult::ok(tag.into()).with_message("Tag atualizada com sucesso")
        })
    }

    async fn try_update(&self, id: Uuid, name: String) -> Result<Tag, ApplicationException> {
        const CONTEXT: &str = "Erro ao atualizar tag";

        self.find_active(id, CONTEXT).await?;
        self.ensure_name_free(&name, Some(id), CONTEXT).await?;
        self.tags
            .update(id, name)
            .await
            .map_err(conflict_or_fault(NAME_TAKEN, CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(TAG_NOT_FOUND))
    }

    /// Soft delete a tag
    pub async fn delete(&self, id: Uuid) -> ApiResult<TagResponse> {
        tracing::info!(tag_id = %id, "Deactivating tag");

        self.try_delete(id).await.map_or_else(ApiResult::from, |tag| {
            ApiResult::ok(tag.into()).with_message("Tag desativada com sucesso")
        })
    }

    async fn try_delete(&self, id: Uuid) -> Result<Tag, ApplicationException> {
        const CONTEXT: &str = "Erro ao desativar tag";

        let tag = self
            .tags
            .find_by_id(id)
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(TAG_NOT_FOUND))?;
        if !tag.is_active() {
            return Err(ApplicationException::conflict("Tag já está desativada"));
        }

        self.tags
            .set_deleted_at(id, Some(Utc::now()))
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(TAG_NOT_FOUND))
    }

    /// Live articles carrying an active tag
    pub async fn articles(&self, id: Uuid) -> ApiResult<Vec<ArticleSummary>> {
        match self.find_active(id, "Erro ao buscar artigos da tag").await {
            Ok(_) => self.article_tags.get_articles_by_tag(id).await,
            Err(err) => err.into(),
        }
    }

    async fn find_active(&self, id: Uuid, context: &'static str) -> Result<Tag, ApplicationException> {
        self.tags
            .find_by_id(id)
            .await
            .map_err(fault(context))?
            .filter(Tag::is_active)
            .ok_or_else(|| ApplicationException::not_found(TAG_NOT_FOUND))
    }

    async fn ensure_name_free(
        &self,
        name: &str,
        owner: Option<Uuid>,
        context: &'static str,
    ) -> Result<(), ApplicationException> {
        let existing = self
            .tags
            .find_by_name(name.to_string())
            .await
            .map_err(fault(context))?;

        match existing {
            Some(tag) if Some(tag.id) != owner => {
                tracing::warn!(%name, "Tag name already taken");
                Err(ApplicationException::conflict(NAME_TAKEN))
            }
            _ => Ok(()),
        }
    }
}
