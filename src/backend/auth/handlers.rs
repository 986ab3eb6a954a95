//! Auth Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::backend::auth::schema::validate_login;
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::shared::blog::{LoginRequest, UserResponse};
use crate::shared::result::ApiResult;

/// `POST /api/auth/login`
///
/// # Errors
///
/// * `400 Bad Request` - malformed body or invalid email/password format
/// * `401 Unauthorized` - unknown email or wrong password
/// * `403 Forbidden` - deactivated account
pub async fn login(
    State(service): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResult<UserResponse>, BackendError> {
    let Json(payload) = payload?;
    let credentials = validate_login(payload)?;
    Ok(service.login(credentials).await)
}
