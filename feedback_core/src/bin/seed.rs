//! Seeds the sample feedback data.
//!
//! Run with:
//! ```
//! cargo run -p feedback_core --bin seed
//! ```
//!
//! The database comes from `DATABASE_URL`, or from the config file in the
//! platform data directory when that is unset.

use std::process::ExitCode;

use feedback_core::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::get_or_init().await?;
    let db = match models::open_or_create_db(&config).await {
        Ok(db) => db,
        Err(err) => {
            error!(error = %err, "seed failed: could not connect");
            return Ok(ExitCode::FAILURE);
        }
    };

    info!("Connected to database");

    let seeder = Seeder::new(db);

    let outcome = match models::migrate_up(seeder.connection()).await {
        Ok(()) => seeder.run().await,
        Err(err) => Err(SeedError::from(err)),
    };

    // Released on both paths
    if let Err(err) = seeder.close().await {
        warn!(error = %err, "failed to close database connection");
    }

    match outcome {
        Ok(summary) => {
            info!("Database seeded: {summary}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(kind = ?err.kind(), error = %err, "seed failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
