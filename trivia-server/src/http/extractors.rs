//! Custom Axum extractors
//!
//! Each one turns axum's own rejection into the 400 JSON envelope.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use fsnd_core::{Pagination, PaginationParams};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::server::AppState;

/// JSON body; malformed or mistyped bodies are a bad request
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "rejected JSON body");
            ApiError::BadRequest
        })?;

        Ok(Self(value))
    }
}

/// Integer id from the path
pub struct PathId(pub i32);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<i32> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest)?;

        Ok(Self(id))
    }
}

/// `?page=N` resolved against the configured page size
pub struct Page(pub Pagination);

impl FromRequestParts<Arc<AppState>> for Page {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Query(params): Query<PaginationParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest)?;

        Ok(Self(params.with_page_size(state.page_size)))
    }
}
