//! Database operations for the contacts SQLite database.
//!
//! ## Tables
//!
//! - `contacts` - One row per contact; `email` carries a `UNIQUE` constraint
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/`, embedded in the
//! binary and applied at startup. They can also be run on their own:
//! ```bash
//! cargo run -p contact-book-cli -- migrate
//! ```

pub mod contacts;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use contacts::ContactRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Another contact already uses this email address.
    #[error("email already exists")]
    DuplicateEmail,
}

/// Map a unique-constraint violation to [`RepositoryError::DuplicateEmail`].
///
/// `email` is the only unique column besides the primary key, which the
/// application never writes explicitly.
pub(crate) fn map_unique_violation(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::DuplicateEmail;
    }
    RepositoryError::Database(e)
}

/// Create a SQLite connection pool with sensible defaults.
///
/// File databases are created if missing and opened in WAL mode. In-memory
/// databases live only as long as their connection, so the pool keeps exactly
/// one connection open for its whole lifetime.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    if is_in_memory(url) {
        return in_memory_pool(options).await;
    }

    SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options.journal_mode(SqliteJournalMode::Wal))
        .await
}

/// Create a fresh, empty in-memory database with migrations applied.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the connection or a migration fails.
pub async fn create_in_memory_pool() -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = in_memory_pool(options).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply any pending migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await.map_err(sqlx::Error::from)?;
    Ok(())
}

async fn in_memory_pool(options: SqliteConnectOptions) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
