//! Response envelopes and the single fault-to-response mapping.
//!
//! Handlers never build error responses themselves. Anything that goes
//! wrong becomes an [`ApiError`], and [`ApiError::into_response`] renders
//! every fault as the same opaque 500 envelope. Fault details are logged,
//! never returned.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use books_catalog::CatalogError;
use books_db::DbPool;
use rusqlite::Connection;
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

/// `{"status_code": .., "message": ..}`
#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    pub status_code: u16,
    pub message: String,
}

/// `{"status_code": .., "result": ..}`
#[derive(Debug, Serialize)]
pub struct ResultEnvelope<T> {
    pub status_code: u16,
    pub result: T,
}

impl MessageEnvelope {
    /// The body every successful mutation returns.
    pub fn success() -> Json<Self> {
        Json(Self {
            status_code: StatusCode::OK.as_u16(),
            message: "success".to_string(),
        })
    }

    fn for_status(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
        }
    }
}

impl<T: Serialize> ResultEnvelope<T> {
    pub fn ok(result: T) -> Json<Self> {
        Json(Self {
            status_code: StatusCode::OK.as_u16(),
            result,
        })
    }
}

/// Renders `{"status_code": <status>, "message": <reason phrase>}` with `status`.
pub fn status_envelope(status: StatusCode) -> Response {
    (status, Json(MessageEnvelope::for_status(status))).into_response()
}

/// Everything that can stop a request from completing.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("db connection failed: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("invalid query parameters: {0}")]
    Query(#[from] QueryRejection),
    #[error("invalid path parameters: {0}")]
    Path(#[from] PathRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Query(_) | ApiError::Path(_) => {
                tracing::debug!(error = %self, "rejected request parameters");
                status_envelope(StatusCode::UNPROCESSABLE_ENTITY)
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                status_envelope(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Runs `f` on a pooled connection inside the blocking thread pool.
///
/// The connection is checked out inside the blocking task and returned to
/// the pool when the task finishes, whether `f` succeeds, fails or panics.
pub async fn with_connection<T, F>(pool: &DbPool, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, CatalogError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
        let conn = pool.get()?;
        Ok(f(&conn)?)
    })
    .await?
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    status_envelope(StatusCode::NOT_FOUND)
}

/// Response used by the panic-catching layer.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "request handler panicked");
    status_envelope(StatusCode::INTERNAL_SERVER_ERROR)
}
