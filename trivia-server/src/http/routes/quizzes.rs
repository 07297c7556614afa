//! Quiz play

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::db::repos::QuestionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::{QuizRequest, QuizResponse};

/// POST /quizzes
async fn next_question(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let question = QuestionRepo::new(&state.pool)
        .random_excluding(request.category_filter(), &request.previous_questions)
        .await?;

    if question.is_none() {
        tracing::debug!(asked = request.previous_questions.len(), "quiz exhausted");
    }

    Ok(Json(QuizResponse::next(request.previous_questions, question)))
}

/// Quiz routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quizzes", post(next_question))
}
