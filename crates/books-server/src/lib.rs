//! Books server library logic.

pub mod api;
pub mod api_books;
pub mod config;

use axum::{routing::get, Extension, Json, Router};
use books_db::DbPool;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Handlers check out one connection per request.
    pub pool: DbPool,
}

/// Liveness message at `/`.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Sample books API is online"
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            "/books",
            get(api_books::list_books_handler)
                .post(api_books::create_book_handler)
                .put(api_books::update_book_handler)
                .delete(api_books::delete_book_handler),
        )
        .route("/books/{id}", get(api_books::find_book_handler))
        .fallback(api::not_found)
        .layer(CatchPanicLayer::custom(api::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
