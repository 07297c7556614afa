//! Category routes

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::QuestionPage;
use crate::db::repos::{CategoryMap, CategoryRepo, QuestionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{Page, PathId};
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// GET /categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = CategoryRepo::new(&state.pool).mapping().await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// GET /categories/{id}/questions
async fn category_questions(
    State(state): State<Arc<AppState>>,
    PathId(category): PathId,
    Page(page): Page,
) -> Result<Json<QuestionPage>, ApiError> {
    let questions = QuestionRepo::new(&state.pool)
        .list_for_category(category)
        .await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = CategoryRepo::new(&state.pool).mapping().await?;
    let page = page.paginate(questions);

    Ok(Json(QuestionPage {
        success: true,
        questions: page.items,
        total_questions: page.total,
        categories,
        current_category: Some(category),
    }))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(category_questions))
}
