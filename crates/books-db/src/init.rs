//! Startup guard: open the pool, probe it, and ensure the schema exists.

use crate::migrations::{reset_schema, run_migrations, MigrationError};
use crate::pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
use crate::retry::{retry, RetryError, RetryPolicy};
use thiserror::Error;

/// Why a single initialization attempt failed.
#[derive(Debug, Error)]
pub enum InitError {
    /// The pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The pool was built but no connection could be checked out.
    #[error("failed to acquire database connection: {0}")]
    Connection(#[from] r2d2::Error),

    /// Schema creation (or the opt-in reset) failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Builds a pool and creates the schema, retrying per `policy`.
///
/// Each attempt builds a fresh pool, checks out one connection, optionally
/// drops the schema when `reset` is set, and applies pending migrations.
/// The returned pool is only handed back once the `books` table is known
/// to exist.
///
/// # Errors
///
/// Returns [`RetryError<InitError>`] with the last attempt's failure when
/// every attempt failed.
pub fn initialize_with_retry(
    database_url: &str,
    settings: DbRuntimeSettings,
    policy: &RetryPolicy,
    reset: bool,
) -> Result<DbPool, RetryError<InitError>> {
    retry(policy, |attempt| -> Result<DbPool, InitError> {
        tracing::info!(
            attempt,
            max_attempts = policy.max_attempts,
            "connecting to database"
        );

        let pool = create_pool(database_url, settings)?;
        let conn = pool.get()?;
        if reset {
            reset_schema(&conn)?;
        }
        let applied = run_migrations(&conn)?;
        drop(conn);

        tracing::info!(applied, "database connected and schema ready");
        Ok(pool)
    })
}
