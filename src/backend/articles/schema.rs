//! Article request validation

use uuid::Uuid;

use crate::backend::articles::db::ArticleChanges;
use crate::shared::blog::{CreateArticleRequest, Pagination, PaginationQuery, SearchQuery, UpdateArticleRequest};
use crate::shared::validation::{char_len, is_http_url, require_uuid, ValidationErrors};

pub const MIN_TITLE_LENGTH: usize = 3;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MIN_CONTENT_LENGTH: usize = 10;
pub const MAX_CONTENT_LENGTH: usize = 5000;
pub const MIN_TAGS_PER_ARTICLE: usize = 1;
pub const MAX_TAGS_PER_ARTICLE: usize = 3;
pub const MAX_TERM_LENGTH: usize = 16;

/// Validated `POST /api/articles` body
#[derive(Debug, Clone, PartialEq)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub author_id: Uuid,
    /// Deduplicated, in request order
    pub tag_ids: Vec<Uuid>,
}

/// Validated `PUT /api/articles/{id}` body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateArticle {
    pub changes: ArticleChanges,
    pub tag_ids: Option<Vec<Uuid>>,
}

/// Validated search query
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleSearch {
    pub term: String,
    pub pagination: Pagination,
}

pub fn validate_create(request: CreateArticleRequest) -> Result<CreateArticle, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = match request.title {
        Some(title) => check_title(&mut errors, title),
        None => {
            errors.add("title", "Título do artigo é obrigatório");
            String::new()
        }
    };
    let content = match request.content {
        Some(content) => check_content(&mut errors, content),
        None => {
            errors.add("content", "Conteúdo do artigo é obrigatório");
            String::new()
        }
    };
    let image = check_image(&mut errors, request.image);
    let author_id = require_uuid(&mut errors, "authorId", request.author_id.as_deref(), "ID do autor");
    let tag_ids = check_tag_ids(&mut errors, request.tag_ids.unwrap_or_default());

    errors.finish()?;
    Ok(CreateArticle {
        title,
        content,
        image,
        author_id: author_id.unwrap_or_default(),
        tag_ids,
    })
}

pub fn validate_update(request: UpdateArticleRequest) -> Result<UpdateArticle, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = request.title.map(|t| check_title(&mut errors, t));
    let content = request.content.map(|c| check_content(&mut errors, c));
    let image = check_image(&mut errors, request.image);
    let tag_ids = request.tag_ids.map(|ids| check_tag_ids(&mut errors, ids));

    if title.is_none() && content.is_none() && image.is_none() && tag_ids.is_none() {
        errors.add("body", "Informe ao menos um campo para atualizar");
    }

    errors.finish()?;
    Ok(UpdateArticle {
        changes: ArticleChanges { title, content, image },
        tag_ids,
    })
}

pub fn validate_search(query: SearchQuery) -> Result<ArticleSearch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let term = query.term.map(|t| t.trim().to_string()).unwrap_or_default();
    if term.is_empty() {
        errors.add("term", "Termo de busca é obrigatório");
    } else if char_len(&term) > MAX_TERM_LENGTH {
        errors.add("term", "A busca deve ter no máximo 16 caracteres");
    }

    let pagination = PaginationQuery {
        page: query.page,
        limit: query.limit,
    }
    .validate();

    match pagination {
        Ok(pagination) => {
            errors.finish()?;
            Ok(ArticleSearch { term, pagination })
        }
        Err(page_errors) => {
            for error in page_errors.errors() {
                errors.add(&error.field, error.message.clone());
            }
            Err(errors)
        }
    }
}

fn check_title(errors: &mut ValidationErrors, title: String) -> String {
    let title = title.trim().to_string();
    let len = char_len(&title);
    if len < MIN_TITLE_LENGTH {
        errors.add("title", "Título deve ter no mínimo 3 caracteres");
    } else if len > MAX_TITLE_LENGTH {
        errors.add("title", "Título deve ter no máximo 100 caracteres");
    }
    title
}

fn check_content(errors: &mut ValidationErrors, content: String) -> String {
    let content = content.trim().to_string();
    let len = char_len(&content);
    if len < MIN_CONTENT_LENGTH {
        errors.add("content", "Conteúdo deve ter no mínimo 10 caracteres");
    } else if len > MAX_CONTENT_LENGTH {
        errors.add("content", "Conteúdo deve ter no máximo 5000 caracteres");
    }
    content
}

/// Blank images are treated as absent
fn check_image(errors: &mut ValidationErrors, image: Option<String>) -> Option<String> {
    let image = image.map(|i| i.trim().to_string()).filter(|i| !i.is_empty())?;
    errors.check("image", is_http_url(&image), "URL da imagem deve ser válida");
    Some(image)
}

fn check_tag_ids(errors: &mut ValidationErrors, raw: Vec<String>) -> Vec<Uuid> {
    let mut tag_ids = Vec::with_capacity(raw.len());
    let mut malformed = false;

    for value in &raw {
        match Uuid::parse_str(value.trim()) {
            Ok(id) if !tag_ids.contains(&id) => tag_ids.push(id),
            Ok(_) => {}
            Err(_) => malformed = true,
        }
    }

    if malformed {
        errors.add("tagIds", "ID da tag deve ser um UUID válido");
    } else if tag_ids.len() < MIN_TAGS_PER_ARTICLE {
        errors.add("tagIds", "Um artigo deve ter no mínimo 1 tags");
    } else if tag_ids.len() > MAX_TAGS_PER_ARTICLE {
        errors.add("tagIds", "Um artigo pode ter no máximo 3 tags");
    }

    tag_ids
}
