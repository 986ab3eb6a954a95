//! Login request validation

use crate::backend::users::schema::{check_password, normalize_email};
use crate::shared::blog::LoginRequest;
use crate::shared::validation::{is_email, ValidationErrors};

/// Validated login credentials
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    /// Lowercased
    pub email: String,
    pub password: String,
}

pub fn validate_login(request: LoginRequest) -> Result<Credentials, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let email = normalize_email(request.email.unwrap_or_default());
    errors.check("email", is_email(&email), "Email inválido");

    let password = request.password.unwrap_or_default();
    check_password(&mut errors, &password);

    errors.finish()?;
    Ok(Credentials { email, password })
}
