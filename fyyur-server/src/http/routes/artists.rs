//! Artist pages: listing, search, detail, create, edit

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Form, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use super::home::{home_after_submit, HomeContext};
use super::non_blank;
use super::venues::{SearchContext, SearchForm, SearchResults};
use crate::db::repos::{Artist, ArtistRepo, ArtistSummary, Booking, NamedRef};
use crate::http::error::{PageError, SubmitError};
use crate::http::server::AppState;
use crate::http::view::{templates, View};
use crate::models::forms::parse_genres;
use crate::models::{split_by_time, ArtistFields, ArtistForm};

#[derive(Debug, Serialize)]
pub struct ArtistsContext {
    pub artists: Vec<NamedRef>,
}

/// A show on an artist page: where and when
#[derive(Debug, Serialize)]
pub struct VenueAppearance {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<Booking> for VenueAppearance {
    fn from(b: Booking) -> Self {
        Self {
            show_id: b.show_id,
            venue_id: b.counterpart_id,
            venue_name: b.counterpart_name,
            venue_image_link: b.counterpart_image_link,
            start_time: b.start_time.to_rfc3339(),
        }
    }
}

/// Artist detail page context
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn new(artist: Artist, bookings: Vec<Booking>, now: DateTime<Utc>) -> Self {
        let (past, upcoming) = split_by_time(bookings, now, |b| b.start_time);
        let past_shows: Vec<VenueAppearance> = past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<VenueAppearance> =
            upcoming.into_iter().map(Into::into).collect();

        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.filter(|_| artist.seeking_venue),
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }

    /// Page rebuilt from a submitted edit form when the record can't be read back.
    pub fn from_form(id: i32, form: &ArtistForm) -> Self {
        Self {
            id,
            name: form.name.trim().to_owned(),
            genres: parse_genres(&form.genres).unwrap_or_default(),
            city: non_blank(&form.city),
            state: non_blank(&form.state),
            phone: non_blank(&form.phone),
            website: non_blank(&form.website_link),
            facebook_link: non_blank(&form.facebook_link),
            seeking_venue: form.seeking_venue,
            seeking_description: non_blank(&form.seeking_description)
                .filter(|_| form.seeking_venue),
            image_link: non_blank(&form.image_link),
            past_shows: Vec::new(),
            upcoming_shows: Vec::new(),
            past_shows_count: 0,
            upcoming_shows_count: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtistFormContext {
    pub form: ArtistForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<Artist>,
}

async fn artist_detail(pool: &PgPool, id: i32) -> Result<View<ArtistDetail>, PageError> {
    let repo = ArtistRepo::new(pool);
    let artist = repo.get(id).await?;
    let bookings = repo.bookings(id).await?;
    Ok(View::new(
        templates::SHOW_ARTIST,
        ArtistDetail::new(artist, bookings, Utc::now()),
    ))
}

/// GET /artists
async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<View<ArtistsContext>, PageError> {
    let artists = ArtistRepo::new(&state.pool).list().await?;
    Ok(View::new(templates::ARTISTS, ArtistsContext { artists }))
}

/// POST /artists/search
async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<View<SearchContext<ArtistSummary>>, PageError> {
    let data = ArtistRepo::new(&state.pool)
        .search(&form.search_term, Utc::now())
        .await?;

    Ok(View::new(
        templates::SEARCH_ARTISTS,
        SearchContext {
            results: SearchResults {
                count: data.len(),
                data,
            },
            search_term: form.search_term,
        },
    ))
}

/// GET /artists/{id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<View<ArtistDetail>, PageError> {
    artist_detail(&state.pool, id).await
}

/// GET /artists/create
async fn create_artist_form() -> View<ArtistFormContext> {
    View::new(
        templates::NEW_ARTIST,
        ArtistFormContext {
            form: ArtistForm::default(),
            artist: None,
        },
    )
}

async fn insert_artist(pool: &PgPool, form: &ArtistForm) -> Result<Artist, SubmitError> {
    let fields = ArtistFields::try_from(form)?;
    Ok(ArtistRepo::new(pool).create(&fields).await?)
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> View<HomeContext> {
    let flash = match insert_artist(&state.pool, &form).await {
        Ok(artist) => {
            tracing::info!(artist_id = artist.id, "artist listed");
            format!("Artist {} was successfully listed!", artist.name)
        }
        Err(e) => {
            tracing::warn!(error = %e, "artist create failed");
            format!("An error occurred. Artist {} could not be listed.", form.name)
        }
    };

    home_after_submit(&state.pool, flash).await
}

/// GET /artists/{id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<View<ArtistFormContext>, PageError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;
    Ok(View::new(
        templates::EDIT_ARTIST,
        ArtistFormContext {
            form: ArtistForm::from(&artist),
            artist: Some(artist),
        },
    ))
}

async fn update_artist(pool: &PgPool, id: i32, form: &ArtistForm) -> Result<Artist, SubmitError> {
    let fields = ArtistFields::try_from(form)?;
    Ok(ArtistRepo::new(pool).update(id, &fields).await?)
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<ArtistForm>,
) -> Result<View<ArtistDetail>, PageError> {
    let flash = match update_artist(&state.pool, id, &form).await {
        Ok(artist) => {
            tracing::info!(artist_id = id, "artist updated");
            format!("Artist {} was successfully updated!", artist.name)
        }
        Err(e) if e.is_not_found() => return Err(PageError::NotFound),
        Err(e) => {
            tracing::warn!(artist_id = id, error = %e, "artist update failed");
            format!("An error occurred. Artist {} could not be updated.", form.name)
        }
    };

    let view = match artist_detail(&state.pool, id).await {
        Ok(view) => view,
        Err(PageError::NotFound) => return Err(PageError::NotFound),
        Err(e) => {
            tracing::warn!(artist_id = id, error = ?e, "artist page unavailable after edit");
            View::new(templates::SHOW_ARTIST, ArtistDetail::from_form(id, &form))
        }
    };
    Ok(view.with_flash(flash))
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}
