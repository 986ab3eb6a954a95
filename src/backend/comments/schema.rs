//! Comment request validation

use uuid::Uuid;

use crate::shared::blog::{CreateCommentRequest, UpdateCommentRequest};
use crate::shared::validation::{char_len, require_uuid, ValidationErrors};

pub const MIN_CONTENT_LENGTH: usize = 2;
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// Validated `POST /api/comments` body
#[derive(Debug, Clone, PartialEq)]
pub struct CreateComment {
    pub content: String,
    pub article_id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
}

pub fn validate_create(request: CreateCommentRequest) -> Result<CreateComment, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let content = check_content(&mut errors, request.content);
    let article_id = require_uuid(&mut errors, "articleId", request.article_id.as_deref(), "ID do artigo");
    let user_id = require_uuid(&mut errors, "userId", request.user_id.as_deref(), "ID do usuário");

    let parent_id = match request.parent_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => {
            let parsed = Uuid::parse_str(raw).ok();
            errors.check(
                "parentId",
                parsed.is_some(),
                "ID do comentário pai deve ser um UUID válido",
            );
            parsed
        }
    };

    errors.finish()?;
    Ok(CreateComment {
        content,
        article_id: article_id.unwrap_or_default(),
        user_id: user_id.unwrap_or_default(),
        parent_id,
    })
}

/// The new content of a comment
pub fn validate_update(request: UpdateCommentRequest) -> Result<String, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let content = check_content(&mut errors, request.content);
    errors.finish()?;
    Ok(content)
}

fn check_content(errors: &mut ValidationErrors, content: Option<String>) -> String {
    let Some(content) = content else {
        errors.add("content", "Conteúdo do comentário é obrigatório");
        return String::new();
    };

    let content = content.trim().to_string();
    let len = char_len(&content);
    if len < MIN_CONTENT_LENGTH {
        errors.add("content", "Comentário deve ter no mínimo 2 caracteres");
    } else if len > MAX_CONTENT_LENGTH {
        errors.add("content", "Comentário deve ter no máximo 2000 caracteres");
    }
    content
}
