//! Venue pages: listing by area, search, detail, create, edit, delete

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Form, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::home::{home_after_submit, HomeContext};
use super::non_blank;
use crate::db::repos::{Booking, Venue, VenueRepo};
use crate::http::error::{PageError, SubmitError};
use crate::http::server::AppState;
use crate::http::view::{templates, View};
use crate::models::forms::parse_genres;
use crate::models::{group_by_area, split_by_time, Area, VenueFields, VenueForm, VenueSummary};

/// Search form (`search_term`, default empty)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct AreasContext {
    pub areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct SearchContext<T> {
    pub results: SearchResults<T>,
    pub search_term: String,
}

/// A show on a venue page: who plays and when
#[derive(Debug, Serialize)]
pub struct ArtistAppearance {
    pub show_id: i32,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<Booking> for ArtistAppearance {
    fn from(b: Booking) -> Self {
        Self {
            show_id: b.show_id,
            artist_id: b.counterpart_id,
            artist_name: b.counterpart_name,
            artist_image_link: b.counterpart_image_link,
            start_time: b.start_time.to_rfc3339(),
        }
    }
}

/// Venue detail page context
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    /// Build the page from the record and its bookings sorted ascending.
    pub fn new(venue: Venue, bookings: Vec<Booking>, now: DateTime<Utc>) -> Self {
        let (past, upcoming) = split_by_time(bookings, now, |b| b.start_time);
        let past_shows: Vec<ArtistAppearance> = past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ArtistAppearance> =
            upcoming.into_iter().map(Into::into).collect();

        Self {
            id: venue.id,
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.filter(|_| venue.seeking_talent),
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }

    /// Page rebuilt from a submitted edit form when the record can't be read back.
    pub fn from_form(id: i32, form: &VenueForm) -> Self {
        Self {
            id,
            name: form.name.trim().to_owned(),
            genres: parse_genres(&form.genres).unwrap_or_default(),
            address: non_blank(&form.address),
            city: non_blank(&form.city),
            state: non_blank(&form.state),
            phone: non_blank(&form.phone),
            website: non_blank(&form.website_link),
            facebook_link: non_blank(&form.facebook_link),
            seeking_talent: form.seeking_talent,
            seeking_description: non_blank(&form.seeking_description)
                .filter(|_| form.seeking_talent),
            image_link: non_blank(&form.image_link),
            past_shows: Vec::new(),
            upcoming_shows: Vec::new(),
            past_shows_count: 0,
            upcoming_shows_count: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VenueFormContext {
    pub form: VenueForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
}

async fn venue_detail(pool: &PgPool, id: i32) -> Result<View<VenueDetail>, PageError> {
    let repo = VenueRepo::new(pool);
    let venue = repo.get(id).await?;
    let bookings = repo.bookings(id).await?;
    Ok(View::new(
        templates::SHOW_VENUE,
        VenueDetail::new(venue, bookings, Utc::now()),
    ))
}

/// GET /venues - venues grouped by city and state
async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<View<AreasContext>, PageError> {
    let rows = VenueRepo::new(&state.pool).list_by_area(Utc::now()).await?;
    Ok(View::new(
        templates::VENUES,
        AreasContext {
            areas: group_by_area(rows),
        },
    ))
}

/// POST /venues/search
async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<View<SearchContext<VenueSummary>>, PageError> {
    let data = VenueRepo::new(&state.pool)
        .search(&form.search_term, Utc::now())
        .await?;

    Ok(View::new(
        templates::SEARCH_VENUES,
        SearchContext {
            results: SearchResults {
                count: data.len(),
                data,
            },
            search_term: form.search_term,
        },
    ))
}

/// GET /venues/{id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<View<VenueDetail>, PageError> {
    venue_detail(&state.pool, id).await
}

/// GET /venues/create - empty form
async fn create_venue_form() -> View<VenueFormContext> {
    View::new(
        templates::NEW_VENUE,
        VenueFormContext {
            form: VenueForm::default(),
            venue: None,
        },
    )
}

async fn insert_venue(pool: &PgPool, form: &VenueForm) -> Result<Venue, SubmitError> {
    let fields = VenueFields::try_from(form)?;
    Ok(VenueRepo::new(pool).create(&fields).await?)
}

/// POST /venues/create
async fn create_venue(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> View<HomeContext> {
    let flash = match insert_venue(&state.pool, &form).await {
        Ok(venue) => {
            tracing::info!(venue_id = venue.id, "venue listed");
            format!("Venue {} was successfully listed!", venue.name)
        }
        Err(e) => {
            tracing::warn!(error = %e, "venue create failed");
            format!("An error occurred. Venue {} could not be listed.", form.name)
        }
    };

    home_after_submit(&state.pool, flash).await
}

/// GET /venues/{id}/edit - form prefilled from the record
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<View<VenueFormContext>, PageError> {
    let venue = VenueRepo::new(&state.pool).get(id).await?;
    Ok(View::new(
        templates::EDIT_VENUE,
        VenueFormContext {
            form: VenueForm::from(&venue),
            venue: Some(venue),
        },
    ))
}

async fn update_venue(pool: &PgPool, id: i32, form: &VenueForm) -> Result<Venue, SubmitError> {
    let fields = VenueFields::try_from(form)?;
    Ok(VenueRepo::new(pool).update(id, &fields).await?)
}

/// POST /venues/{id}/edit - overwrite every field, then show the venue
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<VenueForm>,
) -> Result<View<VenueDetail>, PageError> {
    let flash = match update_venue(&state.pool, id, &form).await {
        Ok(venue) => {
            tracing::info!(venue_id = id, "venue updated");
            format!("Venue {} was successfully updated!", venue.name)
        }
        Err(e) if e.is_not_found() => return Err(PageError::NotFound),
        Err(e) => {
            tracing::warn!(venue_id = id, error = %e, "venue update failed");
            format!("An error occurred. Venue {} could not be updated.", form.name)
        }
    };

    let view = match venue_detail(&state.pool, id).await {
        Ok(view) => view,
        Err(PageError::NotFound) => return Err(PageError::NotFound),
        Err(e) => {
            tracing::warn!(venue_id = id, error = ?e, "venue page unavailable after edit");
            View::new(templates::SHOW_VENUE, VenueDetail::from_form(id, &form))
        }
    };
    Ok(view.with_flash(flash))
}

/// POST /venues/{id}/delete and DELETE /venues/{id}
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> View<HomeContext> {
    let flash = match VenueRepo::new(&state.pool).delete(id).await {
        Ok(shows) => {
            tracing::info!(venue_id = id, shows_removed = shows, "venue deleted");
            "The venue has been removed together with all of its shows."
        }
        Err(e) => {
            tracing::warn!(venue_id = id, error = %e, "venue delete failed");
            "It was not possible to delete this Venue"
        }
    };

    home_after_submit(&state.pool, flash).await
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
        .route("/venues/{id}/delete", post(delete_venue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn venue(seeking: bool) -> Venue {
        Venue {
            id: 1,
            name: "The Musical Hop".into(),
            city: Some("San Francisco".into()),
            state: Some("CA".into()),
            address: Some("1015 Folsom Street".into()),
            phone: None,
            genres: vec!["Jazz".into()],
            website: None,
            image_link: None,
            facebook_link: None,
            seeking_talent: seeking,
            seeking_description: Some("We are on the lookout".into()),
        }
    }

    fn booking(artist: i32, start_time: DateTime<Utc>) -> Booking {
        Booking {
            show_id: artist * 10,
            counterpart_id: artist,
            counterpart_name: format!("artist-{artist}"),
            counterpart_image_link: None,
            start_time,
        }
    }

    #[test]
    fn detail_splits_and_counts_shows() {
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap();
        let bookings = vec![
            booking(1, now - Duration::days(30)),
            booking(2, now - Duration::days(1)),
            booking(3, now + Duration::days(1)),
        ];

        let detail = VenueDetail::new(venue(true), bookings, now);
        assert_eq!(detail.past_shows_count, 2);
        assert_eq!(detail.upcoming_shows_count, 1);
        // past shows newest first
        assert_eq!(detail.past_shows[0].artist_id, 2);
        assert_eq!(detail.past_shows[0].show_id, 20);
        assert_eq!(detail.upcoming_shows[0].artist_id, 3);
    }

    #[test]
    fn description_hidden_unless_seeking() {
        let now = Utc::now();
        assert!(VenueDetail::new(venue(true), vec![], now)
            .seeking_description
            .is_some());
        assert!(VenueDetail::new(venue(false), vec![], now)
            .seeking_description
            .is_none());
    }
}
