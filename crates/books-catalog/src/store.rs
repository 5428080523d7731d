//! Persistence operations for the `books` table.
//!
//! Listing issues no `ORDER BY`, so rows come back in whatever order
//! SQLite scans them (insertion order for a plain rowid table, but nothing
//! here relies on that).

use rusqlite::{params, Connection, OptionalExtension};

use crate::book::{Book, BookPatch, NewBook};
use crate::error::CatalogError;
use crate::pagination::PageRequest;

/// Inserts a book and returns the id SQLite assigned to it.
///
/// # Errors
///
/// Returns `CatalogError::Database` if the insert fails.
pub fn create_book(conn: &Connection, book: &NewBook) -> Result<i64, CatalogError> {
    conn.execute(
        "INSERT INTO books (title, pages, created_at) VALUES (?1, ?2, ?3)",
        params![book.title, book.pages, book.created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Looks up a book by primary key. A missing row is `Ok(None)`.
pub fn find_book(conn: &Connection, id: i64) -> Result<Option<Book>, CatalogError> {
    let book = conn
        .query_row(
            "SELECT id, title, pages, created_at FROM books WHERE id = ?1",
            [id],
            Book::from_row,
        )
        .optional()?;
    Ok(book)
}

/// Returns one page of books.
///
/// A negative offset (from `page <= 0`) is handed to SQLite unchanged,
/// which treats it as zero.
pub fn list_books(conn: &Connection, page: &PageRequest) -> Result<Vec<Book>, CatalogError> {
    let mut stmt =
        conn.prepare("SELECT id, title, pages, created_at FROM books LIMIT ?1 OFFSET ?2")?;

    let rows = stmt.query_map(params![page.page_size(), page.offset()], Book::from_row)?;
    let mut books = Vec::new();
    for row in rows {
        books.push(row?);
    }
    Ok(books)
}

/// Applies `patch` to the book with the given id and returns the result.
///
/// The fetch and the write share one transaction. Fields absent from the
/// patch keep their stored values.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if no book has this id, or
/// `CatalogError::Database` on SQL failure. Nothing is written in either
/// case.
pub fn update_book(conn: &Connection, id: i64, patch: &BookPatch) -> Result<Book, CatalogError> {
    let tx = conn.unchecked_transaction()?;

    let Some(mut book) = find_book(&tx, id)? else {
        tracing::debug!(book_id = id, "update target missing");
        return Err(CatalogError::NotFound(id));
    };
    patch.apply(&mut book);

    tx.execute(
        "UPDATE books SET title = ?1, pages = ?2 WHERE id = ?3",
        params![book.title, book.pages, book.id],
    )?;
    tx.commit()?;

    Ok(book)
}

/// Deletes the book with the given id and returns what was removed.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if no book has this id, or
/// `CatalogError::Database` on SQL failure.
pub fn delete_book(conn: &Connection, id: i64) -> Result<Book, CatalogError> {
    let tx = conn.unchecked_transaction()?;

    let Some(book) = find_book(&tx, id)? else {
        tracing::debug!(book_id = id, "delete target missing");
        return Err(CatalogError::NotFound(id));
    };
    tx.execute("DELETE FROM books WHERE id = ?1", [book.id])?;
    tx.commit()?;

    Ok(book)
}
