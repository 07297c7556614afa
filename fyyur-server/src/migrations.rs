//! Schema bootstrap for the booking tables
//!
//! Idempotent `CREATE ... IF NOT EXISTS` statements, safe to run on every start.

use sqlx::PgPool;

/// Create venues, artists and shows if they don't exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running fyyur schema bootstrap...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id SERIAL PRIMARY KEY,
            name VARCHAR NOT NULL,
            city VARCHAR(120),
            state VARCHAR(120),
            address VARCHAR(120),
            phone VARCHAR(120),
            genres TEXT[] NOT NULL,
            website VARCHAR(120),
            image_link VARCHAR(500),
            facebook_link VARCHAR(120),
            seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description VARCHAR(2000)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id SERIAL PRIMARY KEY,
            name VARCHAR NOT NULL,
            city VARCHAR(120),
            state VARCHAR(120),
            phone VARCHAR(120),
            genres TEXT[] NOT NULL,
            website VARCHAR(120),
            image_link VARCHAR(500),
            facebook_link VARCHAR(120),
            seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description VARCHAR(2000)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id SERIAL PRIMARY KEY,
            start_time TIMESTAMPTZ NOT NULL,
            venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id, start_time)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id, start_time)")
        .execute(pool)
        .await?;

    tracing::info!("fyyur schema bootstrap complete");
    Ok(())
}
