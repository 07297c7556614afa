//! Error pages and submission failures
//!
//! Page errors render the 404/500 error templates. Submission failures never
//! reach the client as errors: handlers turn them into a generic flash.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fsnd_core::ValidationError;
use serde_json::json;

use super::view::{templates, View};
use crate::db::repos::DbError;

/// Error that renders an error page
#[derive(Debug)]
pub enum PageError {
    /// Missing record or unknown route (404)
    NotFound,

    /// Database error while reading (500, logged)
    Database(DbError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                View::new(templates::NOT_FOUND, json!({ "error": 404 })),
            )
                .into_response(),
            Self::Database(e) => {
                // Log the actual error, render a generic page
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    View::new(templates::SERVER_ERROR, json!({ "error": 500 })),
                )
                    .into_response()
            }
        }
    }
}

impl From<DbError> for PageError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::NotFound,
            _ => Self::Database(e),
        }
    }
}

/// Why a create/edit/delete submission failed
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid submission: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl SubmitError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Database(DbError::NotFound { .. }))
    }
}

/// Router fallback: unknown paths get the 404 page
pub async fn not_found() -> PageError {
    PageError::NotFound
}
