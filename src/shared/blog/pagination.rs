//! Pagination query parameters and paged responses

use serde::{Deserialize, Serialize};

use crate::shared::validation::ValidationErrors;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Raw `?page=&limit=` query, kept as text so bad numbers become field errors
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PaginationQuery {
    /// Resolve defaults and validate both parameters
    ///
    /// `limit` above [`MAX_LIMIT`] is clamped rather than rejected.
    pub fn validate(&self) -> Result<Pagination, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let page = parse_positive(&mut errors, "page", self.page.as_deref(), DEFAULT_PAGE);
        let limit = parse_positive(&mut errors, "limit", self.limit.as_deref(), DEFAULT_LIMIT);
        errors.finish()?;

        Ok(Pagination::new(page, limit))
    }
}

fn parse_positive(errors: &mut ValidationErrors, field: &str, raw: Option<&str>, default: u32) -> u32 {
    match raw.map(str::trim) {
        None | Some("") => default,
        Some(value) => match value.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                errors.add(field, format!("{field} deve ser um número inteiro positivo"));
                default
            }
        },
    }
}

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Row offset for SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// One page of results with totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: i64) -> Self {
        let limit = i64::from(pagination.limit);
        Self {
            items,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
