//! Schema bootstrap for the trivia tables
//!
//! Idempotent `CREATE ... IF NOT EXISTS` statements, safe to run on every start.

use sqlx::PgPool;

/// Create categories and questions if they don't exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running trivia schema bootstrap...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            type VARCHAR NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question VARCHAR NOT NULL,
            answer VARCHAR NOT NULL,
            category INTEGER NOT NULL REFERENCES categories(id),
            difficulty INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category, id)")
        .execute(pool)
        .await?;

    tracing::info!("trivia schema bootstrap complete");
    Ok(())
}
