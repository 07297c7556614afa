//! fyyur-server: venue/artist/show booking site
//!
//! Every handler runs one query or a short transaction and returns the page
//! context as a JSON [`http::View`] envelope in place of rendered HTML.

pub mod db;
pub mod http;
pub mod migrations;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
