//! The book catalog: model, pagination rules, and persistence.
//!
//! Every operation takes a borrowed [`rusqlite::Connection`] and performs
//! exactly one query or one read-modify-write sequence. Callers own the
//! connection's lifetime; in the server that is a pooled connection held
//! for the duration of a single request.
//!
//! Reads never treat a missing row as an error ([`find_book`] returns
//! `None`), while [`update_book`] and [`delete_book`] report
//! [`CatalogError::NotFound`] because they cannot operate on nothing.

mod book;
mod error;
mod pagination;
mod store;


pub use book::{Book, BookPatch, NewBook};
pub use error::CatalogError;
pub use pagination::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use store::{create_book, delete_book, find_book, list_books, update_book};
