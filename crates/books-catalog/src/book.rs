use chrono::{Local, NaiveDate};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A stored book.
///
/// Serializes as `{"id", "title", "pages", "created_at"}` with the date
/// rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Surrogate key assigned by the database on insert.
    pub id: i64,
    pub title: String,
    pub pages: i64,
    /// Local date on which the book was created. Never updated.
    pub created_at: NaiveDate,
}

impl Book {
    /// Maps a row selected as `id, title, pages, created_at`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            pages: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

/// Fields for a book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub pages: i64,
    pub created_at: NaiveDate,
}

impl NewBook {
    /// A new book stamped with today's date on the server clock.
    pub fn today(title: impl Into<String>, pages: i64) -> Self {
        Self {
            title: title.into(),
            pages,
            created_at: Local::now().date_naive(),
        }
    }
}

/// A partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub pages: Option<i64>,
}

impl BookPatch {
    /// Overwrites the fields of `book` that this patch carries.
    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title.clone_from(title);
        }
        if let Some(pages) = self.pages {
            book.pages = pages;
        }
    }
}
