//! Artist repository

use chrono::{DateTime, Utc};
use fsnd_core::search::contains_pattern;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{Booking, DbError, NamedRef};
use crate::models::ArtistFields;

/// Artist record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Artist search hit with upcoming-show count
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, genres, website, \
                              image_link, facebook_link, seeking_venue, seeking_description";

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every artist's id and name, ordered by id.
    pub async fn list(&self) -> Result<Vec<NamedRef>, DbError> {
        let rows = sqlx::query_as::<_, NamedRef>("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Case-insensitive substring match on name.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistSummary>, DbError> {
        let rows = sqlx::query_as::<_, ArtistSummary>(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) FILTER (WHERE s.start_time >= $2) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE $1 ESCAPE '\'
            GROUP BY a.id
            ORDER BY a.id
            "#,
        )
        .bind(contains_pattern(term))
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Most recently listed artists, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<NamedRef>, DbError> {
        let rows = sqlx::query_as::<_, NamedRef>(
            "SELECT id, name FROM artists ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single artist by id.
    pub async fn get(&self, id: i32) -> Result<Artist, DbError> {
        sqlx::query_as::<_, Artist>(&format!(
            "SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))
    }

    /// Shows by this artist with the hosting venue, ascending by start time.
    pub async fn bookings(&self, id: i32) -> Result<Vec<Booking>, DbError> {
        let rows = sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                s.id AS show_id,
                v.id AS counterpart_id,
                v.name AS counterpart_name,
                v.image_link AS counterpart_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert an artist inside a transaction.
    pub async fn create(&self, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist = sqlx::query_as::<_, Artist>(&format!(
            r#"
            INSERT INTO artists (
                name, city, state, phone, genres, website,
                image_link, facebook_link, seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ARTIST_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.genres)
        .bind(&fields.website)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_venue)
        .bind(&fields.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Overwrite every mutable column of an existing artist.
    pub async fn update(&self, id: i32, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist = sqlx::query_as::<_, Artist>(&format!(
            r#"
            UPDATE artists SET
                name = $2,
                city = $3,
                state = $4,
                phone = $5,
                genres = $6,
                website = $7,
                image_link = $8,
                facebook_link = $9,
                seeking_venue = $10,
                seeking_description = $11
            WHERE id = $1
            RETURNING {ARTIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.phone)
        .bind(&fields.genres)
        .bind(&fields.website)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_venue)
        .bind(&fields.seeking_description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;

        tx.commit().await?;
        Ok(artist)
    }
}
