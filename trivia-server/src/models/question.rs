//! Questions, categories and the bodies that create or search them

use fsnd_core::validation::required_text;
use fsnd_core::ValidationError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::lenient;

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

const MAX_TEXT_LEN: usize = 1000;

/// A stored question, in its wire format
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// Question category; `type` on the wire and in the table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub id: i32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

/// Raw create body. Every field is optional so that a missing field is a
/// validation failure (422) rather than a malformed body (400).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuestion {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub category: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub difficulty: Option<i32>,
}

/// A question ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

impl TryFrom<CreateQuestion> for NewQuestion {
    type Error = ValidationError;

    fn try_from(body: CreateQuestion) -> Result<Self, Self::Error> {
        let question = required_text("question", body.question.as_deref(), MAX_TEXT_LEN)?;
        let answer = required_text("answer", body.answer.as_deref(), MAX_TEXT_LEN)?;
        let category = body.category.ok_or(ValidationError::Empty { field: "category" })?;
        let difficulty = body
            .difficulty
            .ok_or(ValidationError::Empty { field: "difficulty" })?;

        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(ValidationError::OutOfRange {
                field: "difficulty",
                min: MIN_DIFFICULTY.into(),
                max: MAX_DIFFICULTY.into(),
            });
        }

        Ok(Self {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

/// Search body: `{"searchTerm": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuestions {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// Body of `POST /questions`, which carries either a search or a new question.
///
/// A body with a string `searchTerm` is a search; anything else is a create.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuestionsPost {
    Search(SearchQuestions),
    Create(CreateQuestion),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(value: serde_json::Value) -> CreateQuestion {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn question_wire_format() {
        let q = Question {
            id: 2,
            question: "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?".into(),
            answer: "Apollo 13".into(),
            category: 5,
            difficulty: 4,
        };
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({
                "id": 2,
                "question": "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
                "answer": "Apollo 13",
                "category": 5,
                "difficulty": 4
            })
        );
    }

    #[test]
    fn category_serializes_type() {
        let c = Category { id: 1, kind: "Science".into() };
        assert_eq!(serde_json::to_value(&c).unwrap(), json!({"id": 1, "type": "Science"}));
    }

    #[test]
    fn create_accepts_string_category() {
        let body = create(json!({
            "question": "Heres a new question string",
            "answer": "Heres a new answer string",
            "category": "1",
            "difficulty": 1
        }));
        let new = NewQuestion::try_from(body).unwrap();
        assert_eq!(new.category, 1);
        assert_eq!(new.difficulty, 1);
    }

    #[test]
    fn create_requires_every_field() {
        let err = NewQuestion::try_from(create(json!({"question": "Q?"}))).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "answer" });

        let err = NewQuestion::try_from(create(json!({
            "question": "Q?", "answer": "A", "difficulty": 2
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "category" });
    }

    #[test]
    fn create_rejects_blank_text() {
        let err = NewQuestion::try_from(create(json!({
            "question": "   ", "answer": "A", "category": 1, "difficulty": 2
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "question" });
    }

    #[test]
    fn create_checks_difficulty_range() {
        let err = NewQuestion::try_from(create(json!({
            "question": "Q?", "answer": "A", "category": 1, "difficulty": 9
        })))
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "difficulty", .. }));
    }

    #[test]
    fn non_numeric_category_is_malformed() {
        let result: Result<CreateQuestion, _> =
            serde_json::from_value(json!({"category": "science"}));
        assert!(result.is_err());
    }

    #[test]
    fn post_body_with_search_term_is_a_search() {
        let post: QuestionsPost = serde_json::from_value(json!({"searchTerm": "title"})).unwrap();
        match post {
            QuestionsPost::Search(s) => assert_eq!(s.search_term, "title"),
            QuestionsPost::Create(_) => panic!("expected search"),
        }
    }

    #[test]
    fn post_body_without_search_term_is_a_create() {
        let post: QuestionsPost = serde_json::from_value(json!({
            "question": "Q?", "answer": "A", "category": 3, "difficulty": 2
        }))
        .unwrap();
        match post {
            QuestionsPost::Create(c) => assert_eq!(c.category, Some(3)),
            QuestionsPost::Search(_) => panic!("expected create"),
        }
    }
}
