//! Page envelope returned in place of rendered HTML
//!
//! Each handler produces the context a template would receive, tagged with
//! the template name and any flash messages raised during the request.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub mod templates {
    pub const HOME: &str = "pages/home.html";
    pub const VENUES: &str = "pages/venues.html";
    pub const SEARCH_VENUES: &str = "pages/search_venues.html";
    pub const SHOW_VENUE: &str = "pages/show_venue.html";
    pub const ARTISTS: &str = "pages/artists.html";
    pub const SEARCH_ARTISTS: &str = "pages/search_artists.html";
    pub const SHOW_ARTIST: &str = "pages/show_artist.html";
    pub const SHOWS: &str = "pages/shows.html";
    pub const NEW_VENUE: &str = "forms/new_venue.html";
    pub const EDIT_VENUE: &str = "forms/edit_venue.html";
    pub const NEW_ARTIST: &str = "forms/new_artist.html";
    pub const EDIT_ARTIST: &str = "forms/edit_artist.html";
    pub const NEW_SHOW: &str = "forms/new_show.html";
    pub const NOT_FOUND: &str = "errors/404.html";
    pub const SERVER_ERROR: &str = "errors/500.html";
}

/// Template name, flash messages and page context
#[derive(Debug, Serialize)]
pub struct View<T> {
    pub template: &'static str,
    pub flashes: Vec<String>,
    pub context: T,
}

impl<T> View<T> {
    pub fn new(template: &'static str, context: T) -> Self {
        Self {
            template,
            flashes: Vec::new(),
            context,
        }
    }

    pub fn with_flash(mut self, message: impl Into<String>) -> Self {
        self.flashes.push(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
