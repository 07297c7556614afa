//! Route handlers organized by resource

pub mod categories;
pub mod questions;
pub mod quizzes;

use serde::Serialize;

use crate::db::repos::CategoryMap;
use crate::models::Question;

/// One page of questions for the list screen (camelCase keys)
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    pub total_questions: i64,
    pub categories: CategoryMap,
    #[serde(rename = "currentCategory")]
    pub current_category: Option<i32>,
}
