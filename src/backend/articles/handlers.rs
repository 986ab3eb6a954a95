//! Article Handlers
//!
//! HTTP controllers for `/api/articles`. The threaded comment listing of an
//! article lives with the comment handlers.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::backend::articles::schema::{validate_create, validate_search, validate_update};
use crate::backend::articles::service::ArticleService;
use crate::backend::error::BackendError;
use crate::shared::blog::{
    ArticleResponse, CreateArticleRequest, Page, PaginationQuery, SearchQuery, TagResponse,
    UpdateArticleRequest,
};
use crate::shared::result::ApiResult;

type HandlerResult<T> = Result<ApiResult<T>, BackendError>;

pub async fn create_article(
    State(service): State<ArticleService>,
    payload: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> HandlerResult<ArticleResponse> {
    let Json(payload) = payload?;
    let input = validate_create(payload)?;
    Ok(service.create(input).await)
}

pub async fn list_articles(
    State(service): State<ArticleService>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> HandlerResult<Page<ArticleResponse>> {
    let Query(query) = query?;
    let pagination = query.validate()?;
    Ok(service.list(pagination).await)
}

/// `GET /api/articles/search?term=&page=&limit=`
pub async fn search_articles(
    State(service): State<ArticleService>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> HandlerResult<Page<ArticleResponse>> {
    let Query(query) = query?;
    let search = validate_search(query)?;
    Ok(service.search(search).await)
}

pub async fn get_article(
    State(service): State<ArticleService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<ArticleResponse> {
    let Path(id) = id?;
    Ok(service.get(id).await)
}

pub async fn update_article(
    State(service): State<ArticleService>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> HandlerResult<ArticleResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let update = validate_update(payload)?;
    Ok(service.update(id, update).await)
}

pub async fn delete_article(
    State(service): State<ArticleService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<ArticleResponse> {
    let Path(id) = id?;
    Ok(service.delete(id).await)
}

/// `GET /api/articles/{id}/tags`
pub async fn get_article_tags(
    State(service): State<ArticleService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<Vec<TagResponse>> {
    let Path(id) = id?;
    Ok(service.tags(id).await)
}
