//! Database layer - repositories over the shared pool
//!
//! - Listing and detail pages use JOINs, never one query per row
//! - Mutations run in a transaction that rolls back on drop
//! - Foreign keys, not pre-checks, reject shows with unknown ids

pub mod repos;

pub use repos::*;
