/**
 * Auth Service
 *
 * Session-less login: a successful login returns the user and nothing else.
 * Unknown emails and wrong passwords get the same answer, so the response
 * never reveals which emails are registered.
 */

use std::sync::Arc;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::schema::Credentials;
use crate::backend::error::fault;
use crate::backend::users::db::UserRepository;
use crate::shared::blog::UserResponse;
use crate::shared::error::ApplicationException;
use crate::shared::result::ApiResult;

const INVALID_CREDENTIALS: &str = "Email ou Senha inválido";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Check credentials
    ///
    /// # Errors
    ///
    /// * `UNAUTHORIZED` - unknown email or wrong password
    /// * `FORBIDDEN` - the account is deactivated, whatever the password
    pub async fn login(&self, credentials: Credentials) -> ApiResult<UserResponse> {
        tracing::info!(email = %credentials.email, "Starting login");

        self.try_login(credentials).await.map_or_else(
            |err| {
                tracing::warn!(kind = %err.kind(), "Login failed");
                ApiResult::from(err)
            },
            |user| ApiResult::ok(user).with_message("Login realizado com sucesso"),
        )
    }

    async fn try_login(&self, credentials: Credentials) -> Result<UserResponse, ApplicationException> {
        const CONTEXT: &str = "Erro ao realizar login";

        let user = self
            .users
            .find_by_email(credentials.email)
            .await
            .map_err(fault(CONTEXT))?
            .ok_or_else(|| ApplicationException::unauthorized(INVALID_CREDENTIALS))?;

        if !user.is_active() {
            return Err(ApplicationException::forbidden("Conta desativada"));
        }

        let valid = self
            .hasher
            .verify(&credentials.password, &user.password_hash)
            .map_err(fault(CONTEXT))?;
        if !valid {
            return Err(ApplicationException::unauthorized(INVALID_CREDENTIALS));
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user.into())
    }
}
