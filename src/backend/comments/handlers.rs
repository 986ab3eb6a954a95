//! Comment Handlers
//!
//! HTTP controllers for `/api/comments` and `GET /api/articles/{id}/comments`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::backend::comments::schema::{validate_create, validate_update};
use crate::backend::comments::service::CommentService;
use crate::backend::error::BackendError;
use crate::shared::blog::{
    CommentResponse, CommentThread, CreateCommentRequest, Page, PaginationQuery, UpdateCommentRequest,
};
use crate::shared::result::ApiResult;

type HandlerResult<T> = Result<ApiResult<T>, BackendError>;

pub async fn create_comment(
    State(service): State<CommentService>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> HandlerResult<CommentResponse> {
    let Json(payload) = payload?;
    let input = validate_create(payload)?;
    Ok(service.create(input).await)
}

pub async fn list_comments(
    State(service): State<CommentService>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> HandlerResult<Page<CommentResponse>> {
    let Query(query) = query?;
    let pagination = query.validate()?;
    Ok(service.list(pagination).await)
}

pub async fn get_comment(
    State(service): State<CommentService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<CommentResponse> {
    let Path(id) = id?;
    Ok(service.get(id).await)
}

/// `GET /api/comments/{id}/replies?page=&limit=`
pub async fn get_replies(
    State(service): State<CommentService>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> HandlerResult<Page<CommentResponse>> {
    let Path(id) = id?;
    let Query(query) = query?;
    let pagination = query.validate()?;
    Ok(service.replies(id, pagination).await)
}

pub async fn update_comment(
    State(service): State<CommentService>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCommentRequest>, JsonRejection>,
) -> HandlerResult<CommentResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let content = validate_update(payload)?;
    Ok(service.update(id, content).await)
}

pub async fn delete_comment(
    State(service): State<CommentService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<CommentResponse> {
    let Path(id) = id?;
    Ok(service.delete(id).await)
}

/// `GET /api/articles/{id}/comments`
pub async fn get_article_comments(
    State(service): State<CommentService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<Vec<CommentThread>> {
    let Path(id) = id?;
    Ok(service.by_article(id).await)
}
