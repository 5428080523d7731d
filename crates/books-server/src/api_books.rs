//! Handlers for the `/books` resource.
//!
//! All inputs arrive as query or path parameters. Each handler does one
//! unit of work on one pooled connection; see [`with_connection`].

use crate::api::{with_connection, ApiError, MessageEnvelope, ResultEnvelope};
use crate::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    Json,
};
use books_catalog::{
    create_book, delete_book, find_book, list_books, update_book, Book, BookPatch, NewBook,
    PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::num::IntErrorKind;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CreateBookParams {
    pub title: String,
    pub pages: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListBooksParams {
    /// Integers beyond `i64` saturate, so they still clamp to the maximum.
    #[serde(default = "default_page_size", deserialize_with = "saturating_i64")]
    pub page_size: i64,
    #[serde(default = "default_page")]
    pub page: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookParams {
    pub id: i64,
    pub title: Option<String>,
    pub pages: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookParams {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct BookResult {
    pub book: Option<Book>,
}

#[derive(Debug, Serialize)]
pub struct BooksResult {
    pub books: Vec<Book>,
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

/// Parses a decimal integer, saturating at the `i64` bounds on overflow.
fn parse_saturating(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn saturating_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_saturating(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid digit found in {raw:?}")))
}

/// POST /books
pub async fn create_book_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<CreateBookParams>, QueryRejection>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let Query(params) = params?;
    let book = NewBook::today(params.title, params.pages);

    let id = with_connection(&state.pool, move |conn| create_book(conn, &book)).await?;
    tracing::info!(book_id = id, "created book");

    Ok(MessageEnvelope::success())
}

/// GET /books/{id}
///
/// An unknown id is not an error: the result carries `"book": null`.
pub async fn find_book_handler(
    Extension(state): Extension<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ResultEnvelope<BookResult>>, ApiError> {
    let Path(id) = id?;

    let book = with_connection(&state.pool, move |conn| find_book(conn, id)).await?;

    Ok(ResultEnvelope::ok(BookResult { book }))
}

/// GET /books
pub async fn list_books_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<ListBooksParams>, QueryRejection>,
) -> Result<Json<ResultEnvelope<BooksResult>>, ApiError> {
    let Query(params) = params?;
    let page = PageRequest::new(params.page, params.page_size);

    let books = with_connection(&state.pool, move |conn| list_books(conn, &page)).await?;

    Ok(ResultEnvelope::ok(BooksResult { books }))
}

/// PUT /books
///
/// Updating an id that does not exist is a fault and renders as the
/// generic 500, not a 404.
pub async fn update_book_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<UpdateBookParams>, QueryRejection>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let Query(params) = params?;
    let id = params.id;
    let patch = BookPatch {
        title: params.title,
        pages: params.pages,
    };

    with_connection(&state.pool, move |conn| update_book(conn, id, &patch)).await?;
    tracing::info!(book_id = id, "updated book");

    Ok(MessageEnvelope::success())
}

/// DELETE /books
///
/// Same fault semantics as [`update_book_handler`] for unknown ids.
pub async fn delete_book_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<DeleteBookParams>, QueryRejection>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let Query(DeleteBookParams { id }) = params?;

    with_connection(&state.pool, move |conn| delete_book(conn, id)).await?;
    tracing::info!(book_id = id, "deleted book");

    Ok(MessageEnvelope::success())
}
