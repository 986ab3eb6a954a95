//! Tag Handlers
//!
//! HTTP controllers for `/api/tags`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::tags::schema::{validate_create, validate_update};
use crate::backend::tags::service::TagService;
use crate::shared::blog::{ArticleSummary, CreateTagRequest, TagResponse, UpdateTagRequest};
use crate::shared::result::ApiResult;

type HandlerResult<T> = Result<ApiResult<T>, BackendError>;

pub async fn create_tag(
    State(service): State<TagService>,
    payload: Result<Json<CreateTagRequest>, JsonRejection>,
) -> HandlerResult<TagResponse> {
    let Json(payload) = payload?;
    let name = validate_create(payload)?;
    Ok(service.create(name).await)
}

pub async fn list_tags(State(service): State<TagService>) -> ApiResult<Vec<TagResponse>> {
    service.list().await
}

pub async fn get_tag(
    State(service): State<TagService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<TagResponse> {
    let Path(id) = id?;
    Ok(service.get(id).await)
}

pub async fn update_tag(
    State(service): State<TagService>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateTagRequest>, JsonRejection>,
) -> HandlerResult<TagResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let name = validate_update(payload)?;
    Ok(service.update(id, name).await)
}

pub async fn delete_tag(
    State(service): State<TagService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<TagResponse> {
    let Path(id) = id?;
    Ok(service.delete(id).await)
}

/// `GET /api/tags/{id}/articles`
pub async fn get_tag_articles(
    State(service): State<TagService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<Vec<ArticleSummary>> {
    let Path(id) = id?;
    Ok(service.articles(id).await)
}
