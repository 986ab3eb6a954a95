/**
 * User Handlers
 *
 * HTTP controllers for `/api/users`. Each handler extracts and validates the
 * request, calls `UserService`, and returns the service's result unchanged.
 * Extraction and validation failures surface as `BackendError`.
 */

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::users::schema::{validate_create, validate_update};
use crate::backend::users::service::UserService;
use crate::shared::blog::{CreateUserRequest, Page, PaginationQuery, UpdateUserRequest, UserResponse};
use crate::shared::result::ApiResult;

type HandlerResult<T> = Result<ApiResult<T>, BackendError>;

/// `POST /api/users`
pub async fn create_user(
    State(service): State<UserService>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> HandlerResult<UserResponse> {
    let Json(payload) = payload?;
    let input = validate_create(payload)?;
    Ok(service.create(input).await)
}

/// `GET /api/users`
pub async fn list_users(
    State(service): State<UserService>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> HandlerResult<Page<UserResponse>> {
    let Query(query) = query?;
    let pagination = query.validate()?;
    Ok(service.list(pagination).await)
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(service): State<UserService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<UserResponse> {
    let Path(id) = id?;
    Ok(service.get(id).await)
}

/// `PUT /api/users/{id}`
pub async fn update_user(
    State(service): State<UserService>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> HandlerResult<UserResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let changes = validate_update(payload)?;
    Ok(service.update(id, changes).await)
}

/// `DELETE /api/users/{id}`
pub async fn delete_user(
    State(service): State<UserService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<UserResponse> {
    let Path(id) = id?;
    Ok(service.deactivate(id).await)
}

/// `POST /api/users/{id}/reactivate`
pub async fn reactivate_user(
    State(service): State<UserService>,
    id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult<UserResponse> {
    let Path(id) = id?;
    Ok(service.reactivate(id).await)
}
