//! Question repository

use fsnd_core::search::contains_pattern;
use sqlx::PgPool;

use super::DbError;
use crate::models::{NewQuestion, Question};

pub struct QuestionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every question ordered by id.
    pub async fn list_all(&self) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Questions in one category ordered by id.
    pub async fn list_for_category(&self, category: i32) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = $1
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Case-insensitive substring match on the question text.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, DbError> {
        let rows = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question ILIKE $1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(contains_pattern(term))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a question and return its id. Unknown categories fail on the FK.
    pub async fn create(&self, new: &NewQuestion) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.category)
        .bind(new.difficulty)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::not_found("question", id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// One random question not in `exclude`, optionally limited to a category.
    ///
    /// `None` once every eligible question has been excluded.
    pub async fn random_excluding(
        &self,
        category: Option<i32>,
        exclude: &[i32],
    ) -> Result<Option<Question>, DbError> {
        let row = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE ($1::INTEGER IS NULL OR category = $1)
              AND NOT (id = ANY($2))
            ORDER BY random()
            LIMIT 1
            "#,
        )
        .bind(category)
        .bind(exclude)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}
