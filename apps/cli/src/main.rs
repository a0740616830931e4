//! `quadra` - browse and maintain the space catalogue from the terminal.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod commands;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quadra_core::{ApplicationServicesBuilder, AppSettingsService, ListingPolicy, SortField, SortOrder};
use quadra_storage::{
    Database, SqliteAppSettingsRepository, SqliteAuthProvider, SqliteSpaceRepository,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// `quadra` command arguments.
#[derive(Debug, Parser)]
#[command(name = "quadra", about = "Browse the sports space catalogue", version)]
struct Cli {
    /// Database file. Falls back to `QUADRA_DB`, then the platform data dir.
    #[arg(long, global = true, value_name = "path")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every space using the configured listing policy
    List,
    /// Search with optional filters
    Search {
        #[arg(long)]
        sport: Option<String>,
        #[arg(long = "min-price")]
        min_price: Option<f64>,
        #[arg(long = "max-price")]
        max_price: Option<f64>,
        /// Minimum rating (0-5)
        #[arg(long)]
        rating: Option<f64>,
    },
    /// Show a single space
    Show { id: String },
    /// Spaces within a radius of a point
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Radius in km. Defaults to the `catalog.nearby_radius_km` setting.
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Spaces ordered by a field
    Sorted {
        #[arg(long, default_value = "name")]
        by: SortField,
        #[arg(long, default_value = "asc")]
        order: SortOrder,
    },
    /// Create or replace spaces from a JSON array of space records
    Import { file: PathBuf },
    /// Remove a space
    Delete { id: String },
    /// Show or set the listing policy (repository-order | rated-first)
    Policy { value: Option<ListingPolicy> },
    /// Show or set the default nearby radius in km
    Radius { value: Option<f64> },
    /// Local accounts
    #[command(subcommand)]
    Account(AccountCommand),
}

#[derive(Debug, Subcommand)]
enum AccountCommand {
    /// Register a new account
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Check credentials and print the profile
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Change the password of an account
    Passwd {
        #[arg(long)]
        email: String,
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
}

fn resolve_database(cli_path: Option<PathBuf>) -> Result<PathBuf> {
    cli_path
        .or_else(quadra_storage::resolve_database_path)
        .context("No database path: pass --database or set QUADRA_DB")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _guard = logging::init_tracing(&logging::logs_dir())?;

    let db_path = resolve_database(cli.database)?;
    info!(path = ?db_path, "Opening catalogue");
    let db = Arc::new(Mutex::new(Database::open(&db_path)?));

    let settings = AppSettingsService::new(Arc::new(SqliteAppSettingsRepository::new(db.clone())));
    let listing_policy = settings.get_listing_policy().await;
    debug!(%listing_policy, "Loaded listing policy");

    let services = ApplicationServicesBuilder::new()
        .with_space_repo(Arc::new(SqliteSpaceRepository::new(db.clone())))
        .with_auth_provider(Arc::new(SqliteAuthProvider::new(db)))
        .with_listing_policy(listing_policy)
        .build()?;

    match cli.command {
        Command::List => commands::list(&services).await,
        Command::Search {
            sport,
            min_price,
            max_price,
            rating,
        } => commands::search(&services, sport, min_price, max_price, rating).await,
        Command::Show { id } => commands::show(&services, &id).await,
        Command::Nearby { lat, lon, radius } => {
            let radius = match radius {
                Some(radius) => radius,
                None => settings.get_nearby_radius_km().await,
            };
            commands::nearby(&services, lat, lon, radius).await
        }
        Command::Sorted { by, order } => commands::sorted(&services, by, order).await,
        Command::Import { file } => commands::import(&services, &file).await,
        Command::Delete { id } => commands::delete(&services, &id).await,
        Command::Policy { value } => commands::policy(&settings, value).await,
        Command::Radius { value } => commands::radius(&settings, value).await,
        Command::Account(account) => match account {
            AccountCommand::SignUp {
                email,
                password,
                name,
            } => commands::sign_up(&services, &email, &password, name.as_deref()).await,
            AccountCommand::SignIn { email, password } => {
                commands::sign_in(&services, &email, &password).await
            }
            AccountCommand::Passwd {
                email,
                current,
                new,
            } => commands::change_password(&services, &email, &current, &new).await,
        },
    }
}
