//! Seed the database with sample contacts.
//!
//! Contacts are inserted through [`ContactRepository`], so they pass the same
//! validation and uniqueness checks as API writes. Running the command twice
//! inserts nothing the second time.

use contact_book_core::ContactInput;
use contact_book_server::ServerConfig;
use contact_book_server::db::{self, ContactRepository, RepositoryError};
use tracing::{info, warn};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Ben", "Cleo", "Dev", "Elena", "Farid", "Grace", "Hiro", "Ines", "Jonah",
];

const LAST_NAMES: &[&str] = &[
    "Okafor", "Lindqvist", "Moreau", "Patel", "Santos", "Nakamura", "Brennan", "Haddad",
];

const STREETS: &[&str] = &["Maple Ave", "Harbor St", "Elm Rd", "Cedar Ln", "Park Blvd"];

/// Build the `index`th sample contact. Every index gives a distinct email.
#[allow(clippy::indexing_slicing)]
fn sample(index: usize) -> ContactInput {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];
    let street = STREETS[index % STREETS.len()];

    ContactInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        address: format!("{} {street}", 100 + index),
        email: format!(
            "{}.{}{index}@example.com",
            first.to_lowercase(),
            last.to_lowercase()
        ),
        phone: format!("+1202555{:04}", index % 10_000),
    }
}

/// Insert `count` sample contacts.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a database operation fails
/// for a reason other than a duplicate email.
pub async fn contacts(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Connected to database");

    let repo = ContactRepository::new(&pool);
    let mut inserted = 0_usize;
    let mut skipped = 0_usize;

    for index in 0..count {
        let contact = sample(index).validate()?;
        match repo.create(&contact).await {
            Ok(created) => {
                inserted += 1;
                info!(contact_id = %created.id, email = %created.email, "Inserted");
            }
            Err(RepositoryError::DuplicateEmail) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    pool.close().await;

    info!("Seeding complete!");
    info!("  Contacts inserted: {inserted}");
    if skipped > 0 {
        warn!("  Contacts skipped (email already exists): {skipped}");
    }

    Ok(())
}
