//! Show timing: past/upcoming classification and display formatting

use chrono::{DateTime, NaiveDateTime, Utc};
use fsnd_core::ValidationError;

/// Display format for show listings, e.g. `Tue 05, 21, 2019 9:30PM`
pub const DISPLAY_FORMAT: &str = "%a %m, %d, %Y %-I:%M%p";

/// Accepted naive input formats; values are taken as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Where a show sits relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    Past,
    Upcoming,
}

impl When {
    /// Past if it started strictly before `now`, upcoming otherwise.
    pub fn classify(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if start_time < now {
            Self::Past
        } else {
            Self::Upcoming
        }
    }
}

/// Split shows sorted by ascending start time into
/// `(past newest-first, upcoming soonest-first)`.
pub fn split_by_time<T>(
    ascending: Vec<T>,
    now: DateTime<Utc>,
    start_time: impl Fn(&T) -> DateTime<Utc>,
) -> (Vec<T>, Vec<T>) {
    let (mut past, upcoming): (Vec<T>, Vec<T>) = ascending
        .into_iter()
        .partition(|item| When::classify(start_time(item), now) == When::Past);
    past.reverse();
    (past, upcoming)
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

/// Parse a submitted start time.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated variants, or RFC 3339.
pub fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty {
            field: "start_time",
        });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidFormat {
            field: "start_time",
            reason: "expected YYYY-MM-DD HH:MM:SS",
        })
}
