//! Tag request validation

use crate::shared::blog::{CreateTagRequest, UpdateTagRequest};
use crate::shared::validation::{length_between, ValidationErrors};

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 12;

pub fn validate_create(request: CreateTagRequest) -> Result<String, ValidationErrors> {
    validate_name(request.name)
}

pub fn validate_update(request: UpdateTagRequest) -> Result<String, ValidationErrors> {
    validate_name(request.name)
}

fn validate_name(name: Option<String>) -> Result<String, ValidationErrors> {
    let Some(name) = name.map(|n| n.trim().to_string()) else {
        return Err(ValidationErrors::single("name", "O nome da tag é obrigatório"));
    };

    let mut errors = ValidationErrors::new();
    if !length_between(&name, MIN_NAME_LENGTH, usize::MAX) {
        errors.add("name", "A tag deve ter no mínimo 2 caracteres");
    } else if !length_between(&name, MIN_NAME_LENGTH, MAX_NAME_LENGTH) {
        errors.add("name", "A tag deve ter no máximo 12 caracteres");
    }
    errors.finish()?;

    Ok(name)
}
