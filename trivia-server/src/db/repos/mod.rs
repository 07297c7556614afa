//! Repository implementations for categories and questions

pub mod categories;
pub mod questions;

pub use categories::{CategoryMap, CategoryRepo, DEFAULT_CATEGORIES};
pub use questions::QuestionRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
