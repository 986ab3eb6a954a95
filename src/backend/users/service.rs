/**
 * User Service
 *
 * Business rules for user accounts. Every public operation returns an
 * `ApiResult`; repository and hashing failures are logged and reported as a
 * generic infrastructure error.
 */

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::error::{conflict_or_fault, fault};
use crate::backend::users::db::{NewUser, User, UserChanges, UserRepository};
use crate::backend::users::schema::CreateUser;
use crate::shared::blog::{Page, Pagination, UserResponse};
use crate::shared::error::ApplicationException;
use crate::shared::result::ApiResult;

const EMAIL_TAKEN: &str = "Usuário já cadastrado com esse email";
const EMAIL_IN_USE: &str = "Email já está em uso por outro usuário";
const USER_NOT_FOUND: &str = "Usuário não encontrado";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// * `CONFLICT` - the email is already registered, active or not
    pub async fn create(&self, input: CreateUser) -> ApiResult<UserResponse> {
        tracing::info!(email = %input.email, "Registering user");

        self.try_create(input).await.map_or_else(ApiResult::from, |user| {
            ApiResult::created(user).with_message("Usuário registrado com sucesso")
        })
    }

    async fn try_create(&self, input: CreateUser) -> Result<UserResponse, ApplicationException> {
        let existing = self
            .users
            .find_by_email(input.email.clone())
            .await
            .map_err(fault("Erro ao registrar usuário"))?;
        if existing.is_some() {
            tracing::warn!(email = %input.email, "Email already registered");
            return Err(ApplicationException::conflict(EMAIL_TAKEN));
        }

        let password_hash = self
            .hasher
            .hash(&input.password)
            .map_err(fault("Erro ao registrar usuário"))?;

        let user = self
            .users
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                avatar: input.avatar,
            })
            .await
            .map_err(conflict_or_fault(EMAIL_TAKEN, "Erro ao registrar usuário"))?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Fetch one active user
    pub async fn get(&self, id: Uuid) -> ApiResult<UserResponse> {
        self.find_active(id, "Erro ao buscar usuário")
            .await
            .map_or_else(ApiResult::from, |user| {
                ApiResult::ok(user.into()).with_message("Usuário encontrado com sucesso")
            })
    }

    pub async fn list(&self, pagination: Pagination) -> ApiResult<Page<UserResponse>> {
        match self.users.list_active(pagination).await {
            Ok((users, total)) => ApiResult::ok(Page::new(users, pagination, total).map(UserResponse::from))
                .with_message("Usuários buscados com sucesso"),
            Err(err) => fault("Erro ao buscar usuários")(err).into(),
        }
    }

    /// Update name, email, or avatar of an active user
    ///
    /// # Errors
    ///
    /// * `NOT_FOUND` - unknown or deactivated user
    /// * `CONFLICT` - the new email belongs to another user
    pub async fn update(&self, id: Uuid, changes: UserChanges) -> ApiResult<UserResponse> {
        self.try_update(id, changes).await.map_or_else(ApiResult::from, |user| {
            ApiResult::ok(user).with_message("Usuário atualizado com sucesso")
        })
    }

    async fn try_update(&self, id: Uuid, changes: UserChanges) -> Result<UserResponse, ApplicationException> {
        const CONTEXT: &str = "Erro ao atualizar usuário";
        let current = self.find_active(id, CONTEXT).await?;

        if let Some(email) = changes.email.as_ref().filter(|email| **email != current.email) {
            let owner = self
                .users
                .find_by_email(email.clone())
                .await
                .map_err(fault(CONTEXT))?;
            if owner.is_some_and(|other| other.id != id) {
                return Err(ApplicationException::conflict(EMAIL_IN_USE));
            }
        }

        self.users
            .update(id, changes)
            .await
            .map_err(conflict_or_fault(EMAIL_IN_USE, CONTEXT))?
            .map(UserResponse::from)
            .ok_or_else(|| ApplicationException::not_found(USER_NOT_FOUND))
    }

    /// Soft delete a user
    pub async fn deactivate(&self, id: Uuid) -> ApiResult<UserResponse> {
        tracing::info!(user_id = %id, "Deactivating user");

        self.toggle_active(id, false).await.map_or_else(ApiResult::from, |user| {
            ApiResult::ok(user).with_message("Usuário desativado com sucesso")
        })
    }

    /// Undo a soft delete
    pub async fn reactivate(&self, id: Uuid) -> ApiResult<UserResponse> {
        tracing::info!(user_id = %id, "Reactivating user");

        self.toggle_active(id, true).await.map_or_else(ApiResult::from, |user| {
            ApiResult::ok(user).with_message("Usuário reativado com sucesso")
        })
    }

    async fn toggle_active(&self, id: Uuid, activate: bool) -> Result<UserResponse, ApplicationException> {
        let context = if activate {
            "Erro ao reativar usuário"
        } else {
            "Erro ao desativar usuário"
        };

        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(fault(context))?
            .ok_or_else(|| ApplicationException::not_found(USER_NOT_FOUND))?;

        match (activate, user.is_active()) {
            (true, true) => return Err(ApplicationException::conflict("Usuário já está ativo")),
            (false, false) => return Err(ApplicationException::conflict("Usuário já está desativado")),
            _ => {}
        }

        let deleted_at = if activate { None } else { Some(Utc::now()) };
        self.users
            .set_deleted_at(id, deleted_at)
            .await
            .map_err(fault(context))?
            .map(UserResponse::from)
            .ok_or_else(|| ApplicationException::not_found(USER_NOT_FOUND))
    }

    /// Active user or `NOT_FOUND`
    async fn find_active(&self, id: Uuid, context: &'static str) -> Result<User, ApplicationException> {
        self.users
            .find_by_id(id)
            .await
            .map_err(fault(context))?
            .filter(User::is_active)
            .ok_or_else(|| ApplicationException::not_found(USER_NOT_FOUND))
    }
}
