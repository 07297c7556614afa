//! Quiz play request and response

use serde::{Deserialize, Serialize};

use super::lenient;
use super::Question;

/// Category picked on the quiz screen; id 0 is the "All" selector.
/// The frontend also sends the `type` label, which selection ignores.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    #[serde(default)]
    pub previous_questions: Vec<i32>,
}

impl QuizRequest {
    /// Category to draw from, or `None` for every category.
    pub fn category_filter(&self) -> Option<i32> {
        self.quiz_category
            .as_ref()
            .map(|c| c.id)
            .filter(|&id| id != 0)
    }
}

/// `question` is null once every eligible question has been asked.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
    pub previous_questions: Vec<i32>,
}

impl QuizResponse {
    /// Record the drawn question (if any) in the asked list.
    pub fn next(mut previous_questions: Vec<i32>, question: Option<Question>) -> Self {
        if let Some(q) = &question {
            previous_questions.push(q.id);
        }
        Self {
            success: true,
            question,
            previous_questions,
        }
    }
}
