//! User request validation

use crate::backend::users::db::UserChanges;
use crate::shared::blog::{CreateUserRequest, UpdateUserRequest};
use crate::shared::validation::{is_email, is_http_url, length_between, ValidationErrors};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 255;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validated `POST /api/users` body
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUser {
    pub name: String,
    /// Lowercased
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
}

pub fn validate_create(request: CreateUserRequest) -> Result<CreateUser, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = request.name.unwrap_or_default().trim().to_string();
    errors.check(
        "name",
        length_between(&name, MIN_NAME_LENGTH, MAX_NAME_LENGTH),
        "Nome deve ter no mínimo 3 caracteres",
    );

    let email = normalize_email(request.email.unwrap_or_default());
    errors.check("email", is_email(&email), "Email inválido");

    let password = request.password.unwrap_or_default();
    check_password(&mut errors, &password);

    let avatar = non_blank(request.avatar);
    if let Some(url) = &avatar {
        errors.check("avatar", is_http_url(url), "Avatar deve ser uma URL válida");
    }

    errors.finish()?;
    Ok(CreateUser {
        name,
        email,
        password,
        avatar,
    })
}

pub fn validate_update(request: UpdateUserRequest) -> Result<UserChanges, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = request.name.map(|n| n.trim().to_string());
    if let Some(name) = &name {
        errors.check(
            "name",
            length_between(name, MIN_NAME_LENGTH, MAX_NAME_LENGTH),
            "Nome deve ter no mínimo 3 caracteres",
        );
    }

    let email = request.email.map(normalize_email);
    if let Some(email) = &email {
        errors.check("email", is_email(email), "Email inválido");
    }

    let avatar = non_blank(request.avatar);
    if let Some(url) = &avatar {
        errors.check("avatar", is_http_url(url), "Avatar deve ser uma URL válida");
    }

    if name.is_none() && email.is_none() && avatar.is_none() {
        errors.add("body", "Informe ao menos um campo para atualizar");
    }

    errors.finish()?;
    Ok(UserChanges { name, email, avatar })
}

pub(crate) fn normalize_email(email: String) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn check_password(errors: &mut ValidationErrors, password: &str) {
    errors.check(
        "password",
        password.chars().count() >= MIN_PASSWORD_LENGTH,
        "Senha deve ter no mínimo 6 caracteres",
    );
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
