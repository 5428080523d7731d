//! Connection pool creation and configuration.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

const MEMORY_PATH: &str = ":memory:";

/// Distinguishes the shared-cache names of in-memory pools within a process.
static MEMORY_DB_SEQ: AtomicU64 = AtomicU64::new(0);

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled SQLite connections.
    pub pool_max_size: u32,

    /// How long pool construction waits for its first connections, in
    /// milliseconds, before giving up.
    pub connect_timeout_ms: u64,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            pool_max_size: 8,
            connect_timeout_ms: 3_000,
        }
    }
}

/// A type alias for the SQLite connection pool.
///
/// Each pooled connection handed out by [`Pool::get`] is returned to the
/// pool when dropped, so holding one for the span of a unit of work is
/// the whole session lifecycle.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Errors that can occur when creating the database pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Failed to build the connection pool.
    #[error("failed to create database connection pool: {0}")]
    PoolInit(#[from] r2d2::Error),
}

/// Strips an optional `sqlite://` or `sqlite:` scheme from a connection
/// string, leaving the file path (or `:memory:`).
pub fn sqlite_path(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

/// Creates a new SQLite connection pool with WAL mode enabled.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string. Accepts `sqlite://path`,
///   `sqlite:path` or a bare path. `:memory:` opens a shared-cache
///   in-memory database private to this pool, so every pooled connection
///   sees the same schema and rows. Connections in such a pool are never
///   recycled, since the database lives only while one stays open.
///
/// # Errors
///
/// Returns `PoolError::PoolInit` if the connection pool cannot be created.
pub fn create_pool(database_url: &str, settings: DbRuntimeSettings) -> Result<DbPool, PoolError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;

    let path = sqlite_path(database_url);
    let in_memory = path == MEMORY_PATH;
    let manager = if in_memory {
        let seq = MEMORY_DB_SEQ.fetch_add(1, Ordering::Relaxed);
        SqliteConnectionManager::file(format!(
            "file:books-memdb-{}-{}?mode=memory&cache=shared",
            std::process::id(),
            seq
        ))
        .with_flags(flags | OpenFlags::SQLITE_OPEN_URI)
    } else {
        SqliteConnectionManager::file(path).with_flags(flags)
    };

    let manager = manager.with_init(move |conn| {
        // In-memory databases report "memory" which is expected and acceptable.
        let journal_mode: String =
            conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
        if journal_mode != "wal" && journal_mode != "memory" {
            return Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                Some(format!(
                    "failed to set WAL journal mode, got: {}",
                    journal_mode
                )),
            ));
        }
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {};",
            settings.busy_timeout_ms
        ))
    });

    let mut builder = Pool::builder()
        .max_size(settings.pool_max_size)
        .connection_timeout(Duration::from_millis(settings.connect_timeout_ms));
    if in_memory {
        builder = builder.max_lifetime(None).idle_timeout(None);
    }
    let pool = builder.build(manager)?;

    Ok(pool)
}
