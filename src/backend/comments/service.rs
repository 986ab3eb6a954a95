/**
 * Comment Service
 *
 * Comment CRUD and the threaded view of an article's discussion. A reply must
 * point at an active comment of the same article.
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::articles::db::ArticleRepository;
use crate::backend::comments::db::{Comment, CommentRepository, CommentWithAuthor, NewComment};
use crate::backend::comments::schema::CreateComment;
use crate::backend::error::fault;
use crate::backend::users::db::UserRepository;
use crate::shared::blog::{CommentReply, CommentResponse, CommentThread, Page, Pagination};
use crate::shared::error::{ApplicationException, ErrorKind};
use crate::shared::result::ApiResult;

const COMMENT_NOT_FOUND: &str = "Comentário não encontrado";
const ARTICLE_NOT_FOUND: &str = "Artigo não encontrado";

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    articles: Arc<dyn ArticleRepository>,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
        articles: Arc<dyn ArticleRepository>,
    ) -> Self {
        Self {
            comments,
            users,
            articles,
        }
    }

    /// Post a comment or a reply
    ///
    /// # Errors
    ///
    /// * `NOT_FOUND` - the user, article, or parent comment is unknown or deleted
    /// * `INVALID_FIELD` - the parent belongs to another article
    pub async fn create(&self, input: CreateComment) -> ApiResult<CommentResponse> {
        tracing::info!(article_id = %input.article_id, user_id = %input.user_id, "Creating comment");

        self.try_create(input).await.map_or_else(ApiResult::from, |comment| {
            ApiResult::created(comment.into()).with_message("Comentário registrado com sucesso")
        })
    }

    async fn try_create(&self, input: CreateComment) -> Result<Comment, ApplicationException> {
        const CONTEXT: &str = "Erro ao registrar comentário";

        let user = self.users.find_by_id(input.user_id).await.map_err(fault(CONTEXT))?;
        if !user.is_some_and(|u| u.is_active()) {
            return Err(ApplicationException::not_found("Usuário não encontrado"));
        }

        self.ensure_article_active(input.article_id, CONTEXT).await?;

        if let Some(parent_id) = input.parent_id {
            let parent = self
                .comments
                .find_by_id(parent_id)
                .await
                .map_err(fault(CONTEXT))?
                .filter(Comment::is_active)
                .ok_or_else(|| ApplicationException::not_found("Comentário pai não encontrado"))?;

            if parent.article_id != input.article_id {
                tracing::warn!(%parent_id, "Reply targets a comment of another article");
                return Err(ApplicationException::new(
                    "Comentário pai pertence a outro artigo",
                    ErrorKind::InvalidField,
                ));
            }
        }

        self.comments
            .create(NewComment {
                content: input.content,
                article_id: input.article_id,
                user_id: input.user_id,
                parent_id: input.parent_id,
            })
            .await
            .map_err(fault(CONTEXT))
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<CommentResponse> {
        self.find_active(id, "Erro ao buscar comentário")
            .await
            .map_or_else(ApiResult::from, |comment| {
                ApiResult::ok(comment.into()).with_message("Comentário encontrado com sucesso")
            })
    }

    /// Top-level comments across all articles, newest first
    pub async fn list(&self, pagination: Pagination) -> ApiResult<Page<CommentResponse>> {
        match self.comments.list_top_level(pagination).await {
            Ok((comments, total)) => ApiResult::ok(
                Page::new(comments, pagination, total).map(CommentResponse::from),
            )
            .with_message("Comentários buscados com sucesso"),
            Err(err) => fault("Erro ao buscar comentários")(err).into(),
        }
    }

    /// Direct replies of an active comment, oldest first
    pub async fn replies(&self, id: Uuid, pagination: Pagination) -> ApiResult<Page<CommentResponse>> {
        self.try_replies(id, pagination)
            .await
            .map_or_else(ApiResult::from, |page| {
                ApiResult::ok(page).with_message("Respostas buscadas com sucesso")
            })
    }

    async fn try_replies(
        &self,
        id: Uuid,
        pagination: Pagination,
    ) -> Result<Page<CommentResponse>, ApplicationException> {
        const CONTEXT: &str = "Erro ao buscar respostas";

        self.find_active(id, CONTEXT).await?;
        let (replies, total) = self
            .comments
            .list_replies(id, pagination)
            .await
            .map_err(fault(CONTEXT))?;

        Ok(Page::new(replies, pagination, total).map(CommentResponse::from))
    }

    /// The discussion of an article: top-level comments newest first, each
    /// with its direct replies oldest first
    pub async fn by_article(&self, article_id: Uuid) -> ApiResult<Vec<CommentThread>> {
        self.try_by_article(article_id)
            .await
            .map_or_else(ApiResult::from, |threads| {
                ApiResult::ok(threads).with_message("Comentários do artigo buscados com sucesso")
            })
    }

    async fn try_by_article(&self, article_id: Uuid) -> Result<Vec<CommentThread>, ApplicationException> {
        const CONTEXT: &str = "Erro ao buscar comentários do artigo";

        self.ensure_article_active(article_id, CONTEXT).await?;
        let comments = self
            .comments
            .list_thread(article_id)
            .await
            .map_err(fault(CONTEXT))?;

        Ok(build_threads(comments))
    }

    pub async fn update(&self, id: Uuid, content: String) -> ApiResult<CommentResponse> {
        self.try_update(id, content).await.map_or_else(ApiResult::from, |comment| {
            ApiResult::ok(comment.into()).with_message("Comentário atualizado com sucesso")
        })
    }

    async fn try_update(&self, id: Uuid, content: String) -> Result<Comment, ApplicationException> {
        const CONTEXT: &str = "Erro ao atualizar comentário";

        self.find_active(id, CONTEXT).await?;
        self.comments
            .update_content(id, content)
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(COMMENT_NOT_FOUND))
    }

    /// Soft delete a comment; its replies drop out of the article thread
    pub async fn delete(&self, id: Uuid) -> ApiResult<CommentResponse> {
        tracing::info!(comment_id = %id, "Deactivating comment");

        self.try_delete(id).await.map_or_else(ApiResult::from, |comment| {
            ApiResult::ok(comment.into()).with_message("Comentário desativado com sucesso")
        })
    }

    async fn try_delete(&self, id: Uuid) -> Result<Comment, ApplicationException> {
        const CONTEXT: &str = "Erro ao desativar comentário";

        let comment = self
            .comments
            .find_by_id(id)
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(COMMENT_NOT_FOUND))?;
        if !comment.is_active() {
            return Err(ApplicationException::conflict("Comentário já está desativado"));
        }

        self.comments
            .set_deleted_at(id, Some(Utc::now()))
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::not_found(COMMENT_NOT_FOUND))
    }

    async fn find_active(&self, id: Uuid, context: &'static str) -> Result<Comment, ApplicationException> {
        self.comments
            .find_by_id(id)
            .await
            .map_err(fault(context))?
            .filter(Comment::is_active)
            .ok_or_else(|| ApplicationException::not_found(COMMENT_NOT_FOUND))
    }

    async fn ensure_article_active(&self, id: Uuid, context: &'static str) -> Result<(), ApplicationException> {
        let article = self.articles.find_by_id(id).await.map_err(fault(context))?;
        if article.is_some_and(|a| a.is_active()) {
            Ok(())
        } else {
            Err(ApplicationException::not_found(ARTICLE_NOT_FOUND))
        }
    }
}

/// Group rows (oldest first) into one-level threads
///
/// Roots come out newest first and replies oldest first. A row whose parent is
/// not a root in `rows` is dropped.
fn build_threads(rows: Vec<CommentWithAuthor>) -> Vec<CommentThread> {
    let mut roots = Vec::new();
    let mut replies: HashMap<Uuid, Vec<CommentReply>> = HashMap::new();
    for row in rows {
        match row.comment.parent_id {
            None => roots.push(row),
            Some(parent_id) => replies.entry(parent_id).or_default().push(row.into()),
        }
    }

    roots
        .into_iter()
        .rev()
        .map(|root| CommentThread {
            user: root.author(),
            replies: replies.remove(&root.comment.id).unwrap_or_default(),
            comment: root.comment.into(),
        })
        .collect()
}
