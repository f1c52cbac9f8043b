//! Integration tests for Contact Book.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p contact-book-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral port with a private
//! database, so tests run in parallel without sharing state.
//!
//! # Test Categories
//!
//! - `contacts_api` - REST API behavior over real HTTP
//! - `email_uniqueness` - Concurrent writers racing on one email
//! - `client_app` - The client controller against a live server

use std::net::SocketAddr;

use contact_book_client::ContactsClient;
use contact_book_core::ContactInput;
use contact_book_server::db::{self, RepositoryError};
use contact_book_server::{AppState, router};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Errors that can occur while starting a test server.
pub type StartError = Box<dyn std::error::Error + Send + Sync>;

/// A server running in the background for the duration of a test.
///
/// The server task is aborted on drop. A file database lives in a temporary
/// directory that is removed along with the server.
pub struct TestServer {
    addr: SocketAddr,
    pool: SqlitePool,
    handle: JoinHandle<()>,
    db_dir: Option<TempDir>,
}

impl TestServer {
    /// Start a server backed by a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns error if the database or listener cannot be set up.
    pub async fn start() -> Result<Self, StartError> {
        let pool = db::create_in_memory_pool().await?;
        Self::serve(pool, None).await
    }

    /// Start a server backed by a fresh SQLite file in WAL mode.
    ///
    /// Unlike [`TestServer::start`], the pool holds several connections, so
    /// requests really do hit the database concurrently.
    ///
    /// # Errors
    ///
    /// Returns error if the database or listener cannot be set up.
    pub async fn start_with_file() -> Result<Self, StartError> {
        let dir = TempDir::new()?;
        let path = dir.path().join("contacts.db");
        let url = SecretString::from(format!("sqlite://{}?mode=rwc", path.display()));
        let pool = db::create_pool(&url).await?;
        db::run_migrations(&pool).await?;
        Self::serve(pool, Some(dir)).await
    }

    /// Directory holding the database file, for servers started with
    /// [`TestServer::start_with_file`].
    #[must_use]
    pub fn database_dir(&self) -> Option<&std::path::Path> {
        self.db_dir.as_ref().map(TempDir::path)
    }

    async fn serve(pool: SqlitePool, db_dir: Option<TempDir>) -> Result<Self, StartError> {
        let app = router(AppState::new(pool.clone()));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            pool,
            handle,
            db_dir,
        })
    }

    /// Base URL of the running server, e.g. `http://127.0.0.1:54321`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A typed API client pointed at this server.
    #[must_use]
    pub fn client(&self) -> ContactsClient {
        ContactsClient::new(&self.base_url())
    }

    /// Direct access to the server's database.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of rows in the contacts table.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn contact_count(&self) -> Result<i64, RepositoryError> {
        db::ContactRepository::new(&self.pool).count().await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A valid contact whose email is derived from `tag`.
#[must_use]
pub fn contact_input(first_name: &str, last_name: &str, tag: &str) -> ContactInput {
    ContactInput {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        address: "1 Main St".to_string(),
        email: format!("{tag}@example.com"),
        phone: "+12025550123".to_string(),
    }
}
