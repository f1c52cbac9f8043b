//! Contact Book CLI - Database maintenance and contact management.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! cb-cli migrate
//!
//! # Insert sample contacts
//! cb-cli seed --count 25
//!
//! # Talk to a running server
//! cb-cli contacts list --search ann
//! cb-cli contacts add --first-name Ann --last-name Lee --address "1 Main St" \
//!     --email ann@example.com --phone +12025550123
//! cb-cli contacts update 1 --first-name Ann --last-name Lee --address "2 Side Rd" \
//!     --email ann@example.com --phone +12025550123
//! cb-cli contacts delete 1
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply migrations to `CONTACTS_DATABASE_URL`
//! - `seed` - Insert sample contacts directly into the database
//! - `contacts` - List, add, update and delete contacts over HTTP

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use contact_book_core::ContactInput;

mod commands;

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "Contact Book CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Insert sample contacts, skipping emails that already exist
    Seed {
        /// Number of sample contacts to insert
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Manage contacts through a running server
    Contacts {
        /// Server base URL
        #[arg(
            long,
            global = true,
            env = "CONTACTS_SERVER_URL",
            default_value = "http://127.0.0.1:3000"
        )]
        server: String,

        #[command(subcommand)]
        action: ContactAction,
    },
}

#[derive(Subcommand)]
enum ContactAction {
    /// List contacts, optionally filtered
    List {
        /// Only show contacts whose name, email or phone contain this term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a contact
    Add(ContactArgs),
    /// Replace every field of a contact
    Update {
        /// Contact ID
        id: String,

        #[command(flatten)]
        fields: ContactArgs,
    },
    /// Delete a contact
    Delete {
        /// Contact ID
        id: String,
    },
}

/// The five contact fields.
#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,
}

impl From<ContactArgs> for ContactInput {
    fn from(args: ContactArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            address: args.address,
            email: args.email,
            phone: args.phone,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load .env first so it can supply CONTACTS_SERVER_URL
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { count } => commands::seed::contacts(count).await?,
        Commands::Contacts { server, action } => match action {
            ContactAction::List { search } => {
                commands::contacts::list(&server, search.as_deref()).await?;
            }
            ContactAction::Add(fields) => {
                commands::contacts::add(&server, fields.into()).await?;
            }
            ContactAction::Update { id, fields } => {
                commands::contacts::update(&server, &id, fields.into()).await?;
            }
            ContactAction::Delete { id } => commands::contacts::delete(&server, &id).await?,
        },
    }
    Ok(())
}
