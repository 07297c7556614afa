//! Venue repository
//!
//! - list_by_area: one LEFT JOIN query with upcoming-show counts
//! - delete: removes the venue's shows and the venue in one transaction

use chrono::{DateTime, Utc};
use fsnd_core::search::contains_pattern;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::{Booking, DbError, NamedRef};
use crate::models::{VenueFields, VenueInArea, VenueSummary};

/// Venue record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, genres, website, \
                             image_link, facebook_link, seeking_talent, seeking_description";

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All venues ordered by state, city, id with upcoming-show counts.
    pub async fn list_by_area(&self, now: DateTime<Utc>) -> Result<Vec<VenueInArea>, DbError> {
        let rows = sqlx::query_as::<_, VenueInArea>(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.state, v.city, v.id
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Case-insensitive substring match on name.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query_as::<_, VenueSummary>(
            r#"
            SELECT
                v.id,
                v.name,
                COUNT(s.id) FILTER (WHERE s.start_time >= $2) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.name ILIKE $1 ESCAPE '\'
            GROUP BY v.id
            ORDER BY v.id
            "#,
        )
        .bind(contains_pattern(term))
        .bind(now)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Most recently listed venues, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<NamedRef>, DbError> {
        let rows = sqlx::query_as::<_, NamedRef>(
            "SELECT id, name FROM venues ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single venue by id.
    pub async fn get(&self, id: i32) -> Result<Venue, DbError> {
        sqlx::query_as::<_, Venue>(&format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))
    }

    /// Shows at this venue with the performing artist, ascending by start time.
    pub async fn bookings(&self, id: i32) -> Result<Vec<Booking>, DbError> {
        let rows = sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                s.id AS show_id,
                a.id AS counterpart_id,
                a.name AS counterpart_name,
                a.image_link AS counterpart_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a venue inside a transaction.
    pub async fn create(&self, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue = sqlx::query_as::<_, Venue>(&format!(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, genres, website,
                image_link, facebook_link, seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.address)
        .bind(&fields.phone)
        .bind(&fields.genres)
        .bind(&fields.website)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_talent)
        .bind(&fields.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Overwrite every mutable column of an existing venue.
    pub async fn update(&self, id: i32, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue = sqlx::query_as::<_, Venue>(&format!(
            r#"
            UPDATE venues SET
                name = $2,
                city = $3,
                state = $4,
                address = $5,
                phone = $6,
                genres = $7,
                website = $8,
                image_link = $9,
                facebook_link = $10,
                seeking_talent = $11,
                seeking_description = $12
            WHERE id = $1
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.address)
        .bind(&fields.phone)
        .bind(&fields.genres)
        .bind(&fields.website)
        .bind(&fields.image_link)
        .bind(&fields.facebook_link)
        .bind(fields.seeking_talent)
        .bind(&fields.seeking_description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Delete a venue and all of its shows. Returns the number of shows removed.
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let shows = sqlx::query("DELETE FROM shows WHERE venue_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            // tx drops here and rolls back
            return Err(DbError::not_found("venue", id));
        }

        tx.commit().await?;
        Ok(shows)
    }
}
