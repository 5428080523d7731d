//! Error types for catalog operations.

/// Errors that can occur while reading or writing books.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A database operation failed.
    #[error("catalog database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A mutation targeted an id with no stored book.
    #[error("book not found: {0}")]
    NotFound(i64),
}
