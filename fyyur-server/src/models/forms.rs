//! Submitted forms and their validated field sets
//!
//! Forms arrive as `application/x-www-form-urlencoded`. Every field defaults
//! to empty so a partial submission still parses and fails validation with a
//! named field instead of a 400 from the extractor.

use chrono::{DateTime, Utc};
use fsnd_core::validation::{optional_text, required_text};
use fsnd_core::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};

use super::schedule::parse_start_time;
use crate::db::repos::{Artist, Venue};

const NAME_MAX: usize = 120;
const FIELD_MAX: usize = 120;
const IMAGE_LINK_MAX: usize = 500;
const DESCRIPTION_MAX: usize = 2000;

/// Venue create/edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    /// Comma-separated genre list
    pub genres: String,
    pub facebook_link: String,
    pub website_link: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Artist create/edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    /// Comma-separated genre list
    pub genres: String,
    pub facebook_link: String,
    pub website_link: String,
    #[serde(deserialize_with = "checkbox")]
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// Show create form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// Empty form with the start time prefilled to `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            start_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            ..Self::default()
        }
    }
}

/// Validated venue columns, ready to insert or overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFields {
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

/// Validated artist columns, ready to insert or overwrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFields {
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

/// Validated show row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

impl TryFrom<&VenueForm> for VenueFields {
    type Error = ValidationError;

    fn try_from(form: &VenueForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_text("name", Some(&form.name), NAME_MAX)?,
            city: optional_text("city", Some(&form.city), FIELD_MAX)?,
            state: optional_text("state", Some(&form.state), FIELD_MAX)?,
            address: optional_text("address", Some(&form.address), FIELD_MAX)?,
            phone: optional_text("phone", Some(&form.phone), FIELD_MAX)?,
            genres: parse_genres(&form.genres)?,
            website: optional_text("website_link", Some(&form.website_link), FIELD_MAX)?,
            image_link: optional_text("image_link", Some(&form.image_link), IMAGE_LINK_MAX)?,
            facebook_link: optional_text("facebook_link", Some(&form.facebook_link), FIELD_MAX)?,
            seeking_talent: form.seeking_talent,
            seeking_description: optional_text(
                "seeking_description",
                Some(&form.seeking_description),
                DESCRIPTION_MAX,
            )?,
        })
    }
}

impl TryFrom<&ArtistForm> for ArtistFields {
    type Error = ValidationError;

    fn try_from(form: &ArtistForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_text("name", Some(&form.name), NAME_MAX)?,
            city: optional_text("city", Some(&form.city), FIELD_MAX)?,
            state: optional_text("state", Some(&form.state), FIELD_MAX)?,
            phone: optional_text("phone", Some(&form.phone), FIELD_MAX)?,
            genres: parse_genres(&form.genres)?,
            website: optional_text("website_link", Some(&form.website_link), FIELD_MAX)?,
            image_link: optional_text("image_link", Some(&form.image_link), IMAGE_LINK_MAX)?,
            facebook_link: optional_text("facebook_link", Some(&form.facebook_link), FIELD_MAX)?,
            seeking_venue: form.seeking_venue,
            seeking_description: optional_text(
                "seeking_description",
                Some(&form.seeking_description),
                DESCRIPTION_MAX,
            )?,
        })
    }
}

impl TryFrom<&ShowForm> for NewShow {
    type Error = ValidationError;

    fn try_from(form: &ShowForm) -> Result<Self, Self::Error> {
        Ok(Self {
            artist_id: parse_id("artist_id", &form.artist_id)?,
            venue_id: parse_id("venue_id", &form.venue_id)?,
            start_time: parse_start_time(&form.start_time)?,
        })
    }
}

impl From<&Venue> for VenueForm {
    fn from(v: &Venue) -> Self {
        Self {
            name: v.name.clone(),
            city: v.city.clone().unwrap_or_default(),
            state: v.state.clone().unwrap_or_default(),
            address: v.address.clone().unwrap_or_default(),
            phone: v.phone.clone().unwrap_or_default(),
            image_link: v.image_link.clone().unwrap_or_default(),
            genres: v.genres.join(","),
            facebook_link: v.facebook_link.clone().unwrap_or_default(),
            website_link: v.website.clone().unwrap_or_default(),
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl From<&Artist> for ArtistForm {
    fn from(a: &Artist) -> Self {
        Self {
            name: a.name.clone(),
            city: a.city.clone().unwrap_or_default(),
            state: a.state.clone().unwrap_or_default(),
            phone: a.phone.clone().unwrap_or_default(),
            image_link: a.image_link.clone().unwrap_or_default(),
            genres: a.genres.join(","),
            facebook_link: a.facebook_link.clone().unwrap_or_default(),
            website_link: a.website.clone().unwrap_or_default(),
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description.clone().unwrap_or_default(),
        }
    }
}

/// Split a comma-separated genre list, dropping blank entries.
pub fn parse_genres(raw: &str) -> Result<Vec<String>, ValidationError> {
    let genres: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_owned)
        .collect();

    if genres.is_empty() {
        return Err(ValidationError::Empty { field: "genres" });
    }
    Ok(genres)
}

fn parse_id(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be an integer id",
    })
}

/// HTML checkbox: present with `y`/`on`/`true`/`1` means checked.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => b,
        Raw::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "on" | "true" | "1"
        ),
    })
}
