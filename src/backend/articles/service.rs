/**
 * Article Service
 *
 * Business rules for articles. Articles always carry between one and three
 * tags; creation links them in the same transaction as the insert, and
 * updates that name a new tag set go through `ArticleTagService`.
 */

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::article_tags::service::ArticleTagService;
use crate::backend::articles::db::{Article, ArticleRepository, NewArticle};
use crate::backend::articles::schema::{ArticleSearch, CreateArticle, UpdateArticle};
use crate::backend::error::fault;
use crate::backend::users::db::UserRepository;
use crate::shared::blog::{ArticleResponse, Page, Pagination, TagResponse};
use crate::shared::error::ApplicationException;
use crate::shared::result::ApiResult;

const ARTICLE_NOT_FOUND: &str = "Artigo não encontrado";

#[derive(Clone)]
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    users: Arc<dyn UserRepository>,
    article_tags: ArticleTagService,
}

impl ArticleService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        users: Arc<dyn UserRepository>,
        article_tags: ArticleTagService,
    ) -> Self {
        Self {
            articles,
            users,
            article_tags,
        }
    }

    /// Publish an article
    ///
    /// # Errors
    ///
    /// * `NOT_FOUND` - the author or one of the tags is unknown or deactivated
    pub async fn create(&self, input: CreateArticle) -> ApiResult<ArticleResponse> {
        tracing::info!(author_id = %input.author_id, "Creating article");

        self.try_create(input).await.map_or_else(ApiResult::from, |article| {
            ApiResult::created(article).with_message("Artigo registrado com sucesso")
        })
    }

    async fn try_create(&self, input: CreateArticle) -> Result<ArticleResponse, ApplicationException> {
        const CONTEXT: &str = "Erro ao registrar artigo";

        let author = self
            .users
            .find_by_id(input.author_id)
            .await
            .map_err(fault(CONTEXT))?;
        if !author.is_some_and(|user| user.is_active()) {
            return Err(ApplicationException::not_found("Autor não encontrado"));
        }

        self.article_tags.ensure_tags_exist(&input.tag_ids, CONTEXT).await?;

        let article = self
            .articles
            .create_with_tags(
                NewArticle {
                    title: input.title,
                    content: input.content,
                    image: input.image,
                    author_id: input.author_id,
                },
                input.tag_ids,
            )
            .await
            .map_err(fault(CONTEXT))?;

        tracing::info!(article_id = %article.id, "Article created");
        self.with_tags(article).await
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<ArticleResponse> {
        let outcome = match self.find_active(id, "Erro ao buscar artigo").await {
            Ok(article) => self.with_tags(article).await,
            Err(err) => Err(err),
        };

        outcome.map_or_else(ApiResult::from, |article| {
            ApiResult::ok(article).with_message("Artigo encontrado com sucesso")
        })
    }

    pub async fn list(&self, pagination: Pagination) -> ApiResult<Page<ArticleResponse>> {
        let outcome = match self.articles.list_active(pagination).await {
            Ok((articles, total)) => self.page_with_tags(articles, pagination, total).await,
            Err(err) => Err(fault("Erro ao buscar artigos")(err)),
        };

        outcome.map_or_else(ApiResult::from, |page| {
            ApiResult::ok(page).with_message("Artigos buscados com sucesso")
        })
    }

    /// Case-insensitive search over title and author name
    pub async fn search(&self, search: ArticleSearch) -> ApiResult<Page<ArticleResponse>> {
        tracing::info!(term = %search.term, "Searching articles");

        let outcome = match self.articles.search(search.term, search.pagination).await {
            Ok((articles, total)) => self.page_with_tags(articles, search.pagination, total).await,
            Err(err) => Err(fault("Erro ao buscar artigos")(err)),
        };

        outcome.map_or_else(ApiResult::from, |page| {
            ApiResult::ok(page).with_message("Artigos encontrados com sucesso")
        })
    }

    /// Update fields and, when given, replace the tag set
    ///
    /// Tags are checked before anything is written, so an unknown tag leaves
    /// the article untouched. Fields and tags are written in one transaction.
    pub async fn update(&self, id: Uuid, update: UpdateArticle) -> ApiResult<ArticleResponse> {
        self.try_update(id, update).await.map_or_else(ApiResult::from, |article| {
            ApiResult::ok(article).with_message("Artigo atualizado com sucesso")
        })
    }

    async fn try_update(&self, id: Uuid, update: UpdateArticle) -> Result<ArticleResponse, ApplicationException> {
        const CONTEXT: &str = "Erro ao atualizar artigo";

        self.find_active(id, CONTEXT).await?;
        if let Some(tag_ids) = &update.tag_ids {
            self.article_tags.ensure_tags_exist(tag_ids, CONTEXT).await?;
        }

        let article = self
            .articles
            .update(id, update.changes, update.tag_ids)
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(ARTICLE_NOT_FOUND))?;

        tracing::info!(article_id = %id, "Article updated");
        self.with_tags(article).await
    }

    /// Soft delete an article
    pub async fn delete(&self, id: Uuid) -> ApiResult<ArticleResponse> {
        tracing::info!(article_id = %id, "Deactivating article");

        self.try_delete(id).await.map_or_else(ApiResult::from, |article| {
            ApiResult::ok(article).with_message("Artigo desativado com sucesso")
        })
    }

    async fn try_delete(&self, id: Uuid) -> Result<ArticleResponse, ApplicationException> {
        const CONTEXT: &str = "Erro ao desativar artigo";

        let current = self
            .articles
            .find_by_id(id)
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(ARTICLE_NOT_FOUND))?;
        if !current.is_active() {
            return Err(ApplicationException::conflict("Artigo já está desativado"));
        }

        let article = self
            .articles
            .set_deleted_at(id, Some(Utc::now()))
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(ARTICLE_NOT_FOUND))?;

        Ok(article.into_response(Vec::new()))
    }

    /// Live tags of an active article
    pub async fn tags(&self, id: Uuid) -> ApiResult<Vec<TagResponse>> {
        match self.find_active(id, "Erro ao buscar tags do artigo").await {
            Ok(_) => self.article_tags.get_tags_by_article(id).await,
            Err(err) => err.into(),
        }
    }

    async fn find_active(&self, id: Uuid, context: &'static str) -> Result<Article, ApplicationException> {
        self.articles
            .find_by_id(id)
            .await
            .map_err(fault(context))?
            .filter(Article::is_active)
            .ok_or_else(|| ApplicationException::not_found(ARTICLE_NOT_FOUND))
    }

    async fn with_tags(&self, article: Article) -> Result<ArticleResponse, ApplicationException> {
        let tags = self.article_tags.tags_of(article.id).await?;
        Ok(article.into_response(tags))
    }

    async fn page_with_tags(
        &self,
        articles: Vec<Article>,
        pagination: Pagination,
        total: i64,
    ) -> Result<Page<ArticleResponse>, ApplicationException> {
        let mut items = Vec::with_capacity(articles.len());
        for article in articles {
            items.push(self.with_tags(article).await?);
        }
        Ok(Page::new(items, pagination, total))
    }
}
