//! Axum server setup for the booking site

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use fsnd_core::shutdown::shutdown_signal;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::not_found;
use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Allow any origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub pool: PgPool,
}

/// Build the router with every booking route and the 404 fallback.
pub fn build_router(pool: PgPool, cors_permissive: bool) -> Router {
    let cors = if cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:5000"),
                HeaderValue::from_static("http://127.0.0.1:5000"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::home::router())
        .merge(routes::venues::router())
        .merge(routes::artists::router())
        .merge(routes::shows::router())
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { pool }))
}

/// Run the booking server until Ctrl+C or SIGTERM.
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(pool, config.cors_permissive);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("fyyur listening on {}", config.bind_addr);

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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Router over a pool that never connects; fine for routes that skip the database
    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/fyyur_unused")
            .expect("lazy pool");
        build_router(pool, false)
    }

    /// Router whose database refuses every connection
    fn unreachable_app() -> Router {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(250))
            .connect_lazy("postgres://127.0.0.1:1/nodb")
            .expect("lazy pool");
        build_router(pool, false)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_form(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn submit(request: Request<Body>) -> Value {
        let response = unreachable_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert!(!config.cors_permissive);
    }

    #[tokio::test]
    async fn unknown_path_renders_404_page() {
        let response = app()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["template"], "errors/404.html");
    }

    #[tokio::test]
    async fn new_venue_form_is_blank() {
        let response = app()
            .oneshot(Request::builder().uri("/venues/create").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["template"], "forms/new_venue.html");
        assert_eq!(body["context"]["form"]["name"], "");
        assert_eq!(body["context"]["form"]["seeking_talent"], false);
    }

    #[tokio::test]
    async fn new_show_form_prefills_start_time() {
        let response = app()
            .oneshot(Request::builder().uri("/shows/create").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["template"], "forms/new_show.html");
        assert!(!body["context"]["form"]["start_time"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let response = app()
            .oneshot(Request::builder().uri("/venues/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri("/artists/create")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn create_venue_keeps_flash_when_database_is_down() {
        let body = submit(post_form("/venues/create", "name=Hop&genres=Jazz")).await;

        assert_eq!(body["template"], "pages/home.html");
        assert_eq!(body["flashes"][0], "An error occurred. Venue Hop could not be listed.");
        assert_eq!(body["context"]["show_count"], 0);
        assert_eq!(body["context"]["recent_venues"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn invalid_venue_gets_failure_flash() {
        // no genres: rejected before any query
        let body = submit(post_form("/venues/create", "name=Hop")).await;
        assert_eq!(body["flashes"][0], "An error occurred. Venue Hop could not be listed.");
    }

    #[tokio::test]
    async fn edit_venue_falls_back_to_submitted_form() {
        let body = submit(post_form(
            "/venues/3/edit",
            "name=Hop&city=Oakland&genres=Jazz%2CFolk&seeking_talent=y&seeking_description=Bands",
        ))
        .await;

        assert_eq!(body["template"], "pages/show_venue.html");
        assert_eq!(body["flashes"][0], "An error occurred. Venue Hop could not be updated.");
        assert_eq!(body["context"]["id"], 3);
        assert_eq!(body["context"]["city"], "Oakland");
        assert_eq!(body["context"]["genres"], serde_json::json!(["Jazz", "Folk"]));
        assert_eq!(body["context"]["seeking_description"], "Bands");
        assert_eq!(body["context"]["upcoming_shows_count"], 0);
    }

    #[tokio::test]
    async fn delete_venue_keeps_flash_when_database_is_down() {
        let body = submit(post_form("/venues/3/delete", "")).await;

        assert_eq!(body["template"], "pages/home.html");
        assert_eq!(body["flashes"][0], "It was not possible to delete this Venue");
    }

    #[tokio::test]
    async fn artist_submissions_keep_flash_when_database_is_down() {
        let body = submit(post_form("/artists/create", "name=Petals&genres=Rock")).await;
        assert_eq!(body["flashes"][0], "An error occurred. Artist Petals could not be listed.");

        let body = submit(post_form("/artists/4/edit", "name=Petals&genres=Rock")).await;
        assert_eq!(body["template"], "pages/show_artist.html");
        assert_eq!(body["flashes"][0], "An error occurred. Artist Petals could not be updated.");
        assert_eq!(body["context"]["name"], "Petals");
    }

    #[tokio::test]
    async fn create_show_keeps_flash_when_database_is_down() {
        let body = submit(post_form(
            "/shows/create",
            "artist_id=4&venue_id=1&start_time=2035-04-01+20%3A00%3A00",
        ))
        .await;

        assert_eq!(body["template"], "pages/home.html");
        assert_eq!(body["flashes"][0], "An error occurred. Show could not be listed.");
    }
}
