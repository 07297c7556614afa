//! Repository implementations for the booking tables

pub mod artists;
pub mod shows;
pub mod venues;

use serde::Serialize;
use sqlx::FromRow;

pub use artists::{Artist, ArtistRepo, ArtistSummary};
pub use shows::{Booking, ShowListing, ShowRepo};
pub use venues::{Venue, VenueRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Id + name pair used by plain listings
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct NamedRef {
    pub id: i32,
    pub name: String,
}
