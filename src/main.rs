//! Maintenance entry point for the finance tracker core.
//!
//! Monthly materialization is user-triggered rather than scheduled; this
//! binary runs one pass for a single user, defaulting to the current month:
//!
//! ```text
//! fintrack <user_id> [<month> <year>]
//! ```

use dotenvy::dotenv;
use fintrack::config;
use fintrack::core::{period::Period, recurring};
use fintrack::errors::{Error, Result};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn parse_period(month: &str, year: &str) -> Result<Period> {
    let month: u32 = month.parse().map_err(|e| Error::Config {
        message: format!("Invalid month argument: {e}"),
    })?;
    let year: i32 = year.parse().map_err(|e| Error::Config {
        message: format!("Invalid year argument: {e}"),
    })?;
    Period::new(year, month)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing as early as possible
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load .env file; env vars can also be set externally
    dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let (user_id, period) = match args.as_slice() {
        [_, user_id] => (user_id.clone(), Period::current()),
        [_, user_id, month, year] => (user_id.clone(), parse_period(month, year)?),
        _ => {
            eprintln!("Usage: fintrack <user_id> [<month> <year>]");
            return Ok(());
        }
    };

    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    let outcome = recurring::process_recurring_items(&db, &user_id, period).await?;
    info!(
        period = %period.key(),
        created = outcome.created_count,
        skipped = outcome.skipped_count,
        failed = outcome.failed_count,
        "Recurring items processed."
    );

    Ok(())
}
