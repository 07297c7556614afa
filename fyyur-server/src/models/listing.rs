//! Venue list grouped by area

use serde::Serialize;
use sqlx::FromRow;

/// One venue row from the listing query, in area order
#[derive(Debug, Clone, FromRow)]
pub struct VenueInArea {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub num_upcoming_shows: i64,
}

/// Venue entry under an area heading, also the search result shape
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// City + state heading with its venues
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: Option<String>,
    pub state: Option<String>,
    pub venues: Vec<VenueSummary>,
}

/// Group rows already ordered by (state, city) into areas.
///
/// Consecutive rows with the same city and state share one heading, so the
/// input order is kept both across and within areas.
pub fn group_by_area(rows: Vec<VenueInArea>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();

    for row in rows {
        let summary = VenueSummary {
            id: row.id,
            name: row.name,
            num_upcoming_shows: row.num_upcoming_shows,
        };

        match areas.last_mut() {
            Some(area) if area.city == row.city && area.state == row.state => {
                area.venues.push(summary);
            }
            _ => areas.push(Area {
                city: row.city,
                state: row.state,
                venues: vec![summary],
            }),
        }
    }

    areas
}
