//! Booking domain types: submitted forms, listing shapes, show timing

pub mod forms;
pub mod listing;
pub mod schedule;

pub use forms::{ArtistFields, ArtistForm, NewShow, ShowForm, VenueFields, VenueForm};
pub use listing::{group_by_area, Area, VenueInArea, VenueSummary};
pub use schedule::{format_datetime, split_by_time, When};
