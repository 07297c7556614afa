//! Show repository
//!
//! Creation does not pre-check the venue and artist ids: the foreign keys
//! reject unknown references and the error surfaces as a failed insert.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::NewShow;

/// Show seen from one side: the other party's id, name and image
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub show_id: i32,
    pub counterpart_id: i32,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show with both parties for the listing page
#[derive(Debug, Clone, FromRow)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All shows ordered by id, joined with venue and artist.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as::<_, ShowListing>(
            r#"
            SELECT
                s.id,
                v.id AS venue_id,
                v.name AS venue_name,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a show inside a transaction. Returns the new id.
    pub async fn create(&self, show: &NewShow) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Total number of shows.
    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shows")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
