//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! cb-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CONTACTS_DATABASE_URL` - SQLite connection string (falls back to
//!   `DATABASE_URL`, then `sqlite://contacts.db?mode=rwc`)
//!
//! The server applies the same migrations at startup; this command exists for
//! preparing a database ahead of a deploy.

use contact_book_server::ServerConfig;
use contact_book_server::config::ConfigError;
use contact_book_server::db::{self, RepositoryError};
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] RepositoryError),
}

/// Apply pending migrations to the configured database.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// opened or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to contacts database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations complete!");
    Ok(())
}
