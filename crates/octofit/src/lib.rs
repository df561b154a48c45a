//! Persistence layer for the OctoFit Tracker.
//!
//! Holds the record models, the PostgreSQL schema (as sqlx migrations) and
//! the read queries used to inspect teams, users, activities, workouts and
//! the leaderboard.

pub mod database;
pub mod errors;
pub mod models;

use sqlx::PgPool;
use sqlx::migrate::Migrator;

use crate::errors::AppError;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies any pending schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), AppError> {
    tracing::info!("Running database migrations");
    MIGRATOR.run(pool).await?;
    Ok(())
}
