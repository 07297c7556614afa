//! Question routes: listing, delete, create and search

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use fsnd_core::{Paginated, Pagination};
use serde::Serialize;
use sqlx::PgPool;

use super::QuestionPage;
use crate::db::repos::{CategoryMap, CategoryRepo, DbError, QuestionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, Page, PathId};
use crate::http::server::AppState;
use crate::models::{CreateQuestion, NewQuestion, Question, QuestionsPost, SearchQuestions};

/// Result of a delete, create or search (snake_case keys)
#[derive(Debug, Serialize)]
pub struct QuestionsChanged {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i32>,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: CategoryMap,
    pub current_category: Option<i32>,
}

impl QuestionsChanged {
    fn new(page: Paginated<Question>, categories: CategoryMap) -> Self {
        Self {
            success: true,
            deleted: None,
            created: None,
            questions: page.items,
            total_questions: page.total,
            categories,
            current_category: None,
        }
    }
}

/// Current page of the full question list plus the category map.
async fn snapshot(
    pool: &PgPool,
    page: Pagination,
) -> Result<(Paginated<Question>, CategoryMap), DbError> {
    let questions = QuestionRepo::new(pool).list_all().await?;
    let categories = CategoryRepo::new(pool).mapping().await?;
    Ok((page.paginate(questions), categories))
}

/// GET /questions
async fn list_questions(
    State(state): State<Arc<AppState>>,
    Page(page): Page,
) -> Result<Json<QuestionPage>, ApiError> {
    let (page, categories) = snapshot(&state.pool, page).await?;
    if page.total == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionPage {
        success: true,
        questions: page.items,
        total_questions: page.total,
        categories,
        current_category: None,
    }))
}

/// DELETE /questions/{id}
async fn delete_question(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    Page(page): Page,
) -> Result<Json<QuestionsChanged>, ApiError> {
    QuestionRepo::new(&state.pool)
        .delete(id)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(question_id = id, "question deleted");

    let (page, categories) = snapshot(&state.pool, page)
        .await
        .map_err(ApiError::unprocessable)?;

    Ok(Json(QuestionsChanged {
        deleted: Some(id),
        ..QuestionsChanged::new(page, categories)
    }))
}

async fn create_question(
    pool: &PgPool,
    page: Pagination,
    body: CreateQuestion,
) -> Result<Json<QuestionsChanged>, ApiError> {
    let new = NewQuestion::try_from(body)?;
    let id = QuestionRepo::new(pool)
        .create(&new)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(question_id = id, category = new.category, "question created");

    let (page, categories) = snapshot(pool, page)
        .await
        .map_err(ApiError::unprocessable)?;

    Ok(Json(QuestionsChanged {
        created: Some(id),
        ..QuestionsChanged::new(page, categories)
    }))
}

/// Matching questions, paginated.
///
/// Unlike the listing and create/delete responses, `total_questions` here is
/// the number of matches, not the size of the questions table, so the
/// frontend pages through the results it was shown.
async fn search_questions(
    pool: &PgPool,
    page: Pagination,
    term: &str,
) -> Result<Json<QuestionsChanged>, ApiError> {
    let matches = QuestionRepo::new(pool)
        .search(term)
        .await
        .map_err(ApiError::unprocessable)?;
    if matches.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = CategoryRepo::new(pool)
        .mapping()
        .await
        .map_err(ApiError::unprocessable)?;

    Ok(Json(QuestionsChanged::new(page.paginate(matches), categories)))
}

/// POST /questions - search or create, depending on the body
async fn post_questions(
    State(state): State<Arc<AppState>>,
    Page(page): Page,
    ApiJson(body): ApiJson<QuestionsPost>,
) -> Result<Json<QuestionsChanged>, ApiError> {
    match body {
        QuestionsPost::Search(search) => search_questions(&state.pool, page, &search.search_term).await,
        QuestionsPost::Create(create) => create_question(&state.pool, page, create).await,
    }
}

/// POST /questions/search
async fn post_search(
    State(state): State<Arc<AppState>>,
    Page(page): Page,
    ApiJson(search): ApiJson<SearchQuestions>,
) -> Result<Json<QuestionsChanged>, ApiError> {
    search_questions(&state.pool, page, &search.search_term).await
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/search", post(post_search))
        .route("/questions/{id}", delete(delete_question))
}
