//! Populates the OctoFit database with the demo dataset.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```

use octofit::database::Database;
use seed_data::prelude::*;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SeedConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    if config.run_migrations {
        octofit::migrate(&pool).await?;
    }

    let dataset = match &config.dataset_path {
        Some(path) => {
            tracing::info!("Loading dataset from {}", path.display());
            DemoDataset::from_json_file(path)?
        }
        None => DemoDataset::octofit(),
    };

    tracing::info!("Seeding {} records", dataset.record_count());

    let summary = Seeder::new(pool.clone()).seed(&dataset).await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Removed: {}", summary.deleted);
    tracing::info!("  Teams: {}", summary.teams);
    tracing::info!("  Users: {}", summary.users);
    tracing::info!("  Activities: {}", summary.activities);
    tracing::info!("  Workouts: {}", summary.workouts);
    tracing::info!("  Leaderboard: {}", summary.leaderboard);

    println!("Database populated with test data.");

    // The seed is committed; a failed read-back only warns.
    match Database::new(pool).counts().await {
        Ok(counts) => tracing::info!("Rows now in database: {}", counts.total()),
        Err(e) => tracing::warn!("Could not read back row counts: {e}"),
    }

    Ok(())
}
