//! Show pages: listing and creation

use std::sync::Arc;

use axum::{extract::State, routing::get, Form, Router};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use super::home::{home_after_submit, HomeContext};
use crate::db::repos::{ShowListing, ShowRepo};
use crate::http::error::{PageError, SubmitError};
use crate::http::server::AppState;
use crate::http::view::{templates, View};
use crate::models::{format_datetime, NewShow, ShowForm};

/// Show listing entry with a display timestamp
#[derive(Debug, Serialize)]
pub struct ShowEntry {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowListing> for ShowEntry {
    fn from(s: ShowListing) -> Self {
        Self {
            show_id: s.id,
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: format_datetime(&s.start_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowsContext {
    pub shows: Vec<ShowEntry>,
}

#[derive(Debug, Serialize)]
pub struct ShowFormContext {
    pub form: ShowForm,
}

/// GET /shows
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<View<ShowsContext>, PageError> {
    let shows = ShowRepo::new(&state.pool)
        .list()
        .await?
        .into_iter()
        .map(ShowEntry::from)
        .collect();

    Ok(View::new(templates::SHOWS, ShowsContext { shows }))
}

/// GET /shows/create
async fn create_show_form() -> View<ShowFormContext> {
    View::new(
        templates::NEW_SHOW,
        ShowFormContext {
            form: ShowForm::starting_at(Utc::now()),
        },
    )
}

async fn insert_show(pool: &PgPool, form: &ShowForm) -> Result<i32, SubmitError> {
    let show = NewShow::try_from(form)?;
    Ok(ShowRepo::new(pool).create(&show).await?)
}

/// POST /shows/create
async fn create_show(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> View<HomeContext> {
    let flash = match insert_show(&state.pool, &form).await {
        Ok(id) => {
            tracing::info!(show_id = id, "show listed");
            "Show was successfully listed!"
        }
        Err(e) => {
            tracing::warn!(error = %e, "show create failed");
            "An error occurred. Show could not be listed."
        }
    };

    home_after_submit(&state.pool, flash).await
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entry_formats_start_time() {
        let entry = ShowEntry::from(ShowListing {
            id: 1,
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            artist_id: 4,
            artist_name: "Guns N Petals".into(),
            artist_image_link: None,
            start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap(),
        });
        assert_eq!(entry.start_time, "Tue 05, 21, 2019 9:30PM");
        assert_eq!(entry.show_id, 1);
    }
}
