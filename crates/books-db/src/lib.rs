//! Database layer for the books service.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! embedded SQL migrations, and the bounded startup retry that guards the
//! server from accepting traffic before the `books` table exists.
//!
//! Migrations only ever create missing tables. The one destructive path,
//! [`reset_schema`], is opt-in through configuration and off by default.

mod init;
mod migrations;
mod pool;
mod retry;

pub use init::{initialize_with_retry, InitError};
pub use migrations::{reset_schema, run_migrations, MigrationError};
pub use pool::{create_pool, sqlite_path, DbPool, DbRuntimeSettings, PoolError};
pub use retry::{retry, RetryError, RetryPolicy};
