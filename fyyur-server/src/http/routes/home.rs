//! Home page

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::repos::{ArtistRepo, DbError, NamedRef, ShowRepo, VenueRepo};
use crate::http::error::PageError;
use crate::http::server::AppState;
use crate::http::view::{templates, View};

/// How many recent listings the home page shows
const RECENT_LIMIT: i64 = 10;

#[derive(Debug, Default, Serialize)]
pub struct HomeContext {
    pub recent_venues: Vec<NamedRef>,
    pub recent_artists: Vec<NamedRef>,
    pub show_count: i64,
}

async fn load_home(pool: &PgPool) -> Result<HomeContext, DbError> {
    Ok(HomeContext {
        recent_venues: VenueRepo::new(pool).recent(RECENT_LIMIT).await?,
        recent_artists: ArtistRepo::new(pool).recent(RECENT_LIMIT).await?,
        show_count: ShowRepo::new(pool).count().await?,
    })
}

/// Where create and delete submissions land.
///
/// The flash always reaches the client: if the listings can't be read the
/// page renders with empty lists and a zero count.
pub async fn home_after_submit(pool: &PgPool, flash: impl Into<String>) -> View<HomeContext> {
    let context = load_home(pool).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "home listings unavailable");
        HomeContext::default()
    });
    View::new(templates::HOME, context).with_flash(flash)
}

/// GET /
async fn index(State(state): State<Arc<AppState>>) -> Result<View<HomeContext>, PageError> {
    Ok(View::new(templates::HOME, load_home(&state.pool).await?))
}

/// Home routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}
