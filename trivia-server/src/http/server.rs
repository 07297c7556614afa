//! Axum server setup for the trivia API

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use fsnd_core::pagination::DEFAULT_PER_PAGE;
use fsnd_core::shutdown::shutdown_signal;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::{method_not_allowed, not_found};
use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5001)
    pub bind_addr: SocketAddr,

    /// Questions per page on every paginated endpoint
    pub page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
            page_size: DEFAULT_PER_PAGE,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub pool: PgPool,
    pub page_size: u32,
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

/// Build the router with every trivia route and the JSON 404/405 fallbacks.
pub fn build_router(pool: PgPool, page_size: u32) -> Router {
    Router::new()
        .merge(routes::categories::router())
        .merge(routes::questions::router())
        .merge(routes::quizzes::router())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { pool, page_size }))
}

/// Run the trivia API until Ctrl+C or SIGTERM.
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(pool, config.page_size);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        page_size = config.page_size,
        "trivia listening on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
