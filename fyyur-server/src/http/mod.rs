//! HTTP layer
//!
//! Axum server with:
//! - Localhost-only CORS by default
//! - Request tracing
//! - Graceful shutdown
//! - JSON page envelopes and error pages

pub mod error;
pub mod routes;
pub mod server;
pub mod view;

pub use error::PageError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use view::View;
