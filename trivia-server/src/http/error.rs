//! API error type with IntoResponse
//!
//! Every failure renders the same envelope:
//! `{"success": false, "error": <status>, "message": "<text>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fsnd_core::ValidationError;
use serde_json::json;

use crate::db::repos::DbError;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed body, path or query (400)
    BadRequest,

    /// Missing resource or empty result set (404)
    NotFound,

    /// Route exists but not for this verb (405)
    MethodNotAllowed,

    /// Well-formed request that could not be carried out (422)
    Unprocessable,

    /// Read path failed unexpectedly (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "resource not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Unprocessable => "unprocessable",
            Self::Database(_) => "internal server error",
        }
    }

    /// Map a failure on a write (or write-like) path: missing rows stay 404,
    /// anything else becomes 422.
    pub fn unprocessable(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::NotFound,
            other => {
                tracing::warn!(error = %other, "request could not be processed");
                Self::Unprocessable
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database(e) = &self {
            // Log the actual error, return generic message
            tracing::error!("Database error: {}", e);
        }

        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message()
        });

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => Self::NotFound,
            _ => Self::Database(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        tracing::warn!(error = %e, "rejected question");
        Self::Unprocessable
    }
}

/// Router fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Router fallback for known paths hit with the wrong verb
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let (status, body) = body_of(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"success": false, "error": 404, "message": "resource not found"})
        );
    }

    #[tokio::test]
    async fn unprocessable_envelope() {
        let (status, body) = body_of(ApiError::Unprocessable).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "unprocessable");
    }

    #[tokio::test]
    async fn database_error_is_generic_500() {
        let (status, body) = body_of(ApiError::Database(DbError::Sqlx(sqlx::Error::PoolTimedOut))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }

    #[test]
    fn missing_row_stays_404_on_writes() {
        let err = ApiError::unprocessable(DbError::not_found("question", 7));
        assert!(matches!(err, ApiError::NotFound));

        let err = ApiError::unprocessable(DbError::Sqlx(sqlx::Error::RowNotFound));
        assert!(matches!(err, ApiError::Unprocessable));
    }

    #[test]
    fn validation_failure_is_422() {
        let err = ApiError::from(ValidationError::Empty { field: "answer" });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
