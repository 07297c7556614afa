//! Trivia domain types and request bodies

mod lenient;
pub mod question;
pub mod quiz;

pub use question::{
    Category, CreateQuestion, NewQuestion, Question, QuestionsPost, SearchQuestions,
    MAX_DIFFICULTY, MIN_DIFFICULTY,
};
pub use quiz::{QuizCategory, QuizRequest, QuizResponse};
