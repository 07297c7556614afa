//! HTTP layer
//!
//! Axum server with:
//! - Open CORS for the quiz frontend
//! - Request tracing
//! - Graceful shutdown
//! - JSON error envelopes for 400/404/405/422/500

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
