//! trivia-server: JSON API over a bank of trivia questions
//!
//! Paginated question listing, category filtering, substring search and a
//! quiz endpoint that hands out one unseen question per call.

pub mod db;
pub mod http;
pub mod migrations;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
