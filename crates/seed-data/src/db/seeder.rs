//! Database seeding utilities.

use octofit::models::{Activity, LeaderboardEntry, Team, User, Workout};
use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use tracing::info;

use crate::dataset::DemoDataset;
use crate::plan::SeedPlan;

/// Key for the transaction-scoped advisory lock held while the tables are
/// cleared and refilled.
const SEED_LOCK_KEY: i64 = 0x0c70_f17d;

/// Tables in deletion order: rows that reference others go first.
const TABLES: [&str; 5] = ["leaderboard", "activities", "workouts", "users", "teams"];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Unknown team: {0}")]
    UnknownTeam(String),
    #[error("Unknown user: {0}")]
    UnknownUser(String),
}

/// Rows removed and inserted by a successful seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub deleted: u64,
    pub teams: usize,
    pub users: usize,
    pub activities: usize,
    pub workouts: usize,
    pub leaderboard: usize,
}

/// Replaces the contents of the OctoFit tables with a demo dataset.
pub struct Seeder {
    pool: PgPool,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Deletes every team, user, activity, workout and leaderboard entry, then
    /// inserts `dataset`.
    ///
    /// Runs in a single transaction. On any error nothing is committed and the
    /// previous contents remain.
    pub async fn seed(&self, dataset: &DemoDataset) -> Result<SeedSummary, SeedError> {
        let plan = SeedPlan::build(dataset)?;

        let mut tx = self.pool.begin().await?;
        let deleted = Self::delete_all(&mut tx).await?;

        info!("Seeding {} teams...", plan.teams.len());
        for team in &plan.teams {
            Self::insert_team(&mut tx, team).await?;
        }

        info!("Seeding {} users...", plan.users.len());
        for user in &plan.users {
            Self::insert_user(&mut tx, user).await?;
        }

        info!("Seeding {} activities...", plan.activities.len());
        for activity in &plan.activities {
            Self::insert_activity(&mut tx, activity).await?;
        }

        info!("Seeding {} workouts...", plan.workouts.len());
        for workout in &plan.workouts {
            Self::insert_workout(&mut tx, workout).await?;
        }

        info!("Seeding {} leaderboard entries...", plan.leaderboard.len());
        for entry in &plan.leaderboard {
            Self::insert_leaderboard_entry(&mut tx, entry).await?;
        }

        tx.commit().await?;

        let summary = SeedSummary {
            deleted,
            teams: plan.teams.len(),
            users: plan.users.len(),
            activities: plan.activities.len(),
            workouts: plan.workouts.len(),
            leaderboard: plan.leaderboard.len(),
        };
        info!(?summary, "Seed committed");
        Ok(summary)
    }

    /// Clears all seeded data.
    ///
    /// **WARNING**: This deletes all data from the tables. Use with caution.
    pub async fn clear_all(&self) -> Result<u64, SeedError> {
        let mut tx = self.pool.begin().await?;
        let deleted = Self::delete_all(&mut tx).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    /// Takes the seed lock, then empties every table.
    ///
    /// The lock is held until the caller's transaction commits or rolls back,
    /// so `seed` and `clear_all` never interleave.
    async fn delete_all(conn: &mut PgConnection) -> Result<u64, SeedError> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SEED_LOCK_KEY)
            .execute(&mut *conn)
            .await?;

        info!("Clearing all seeded data...");

        let mut deleted = 0;
        for table in TABLES {
            let result = sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *conn)
                .await?;
            deleted += result.rows_affected();
        }

        info!("Cleared {} rows", deleted);
        Ok(deleted)
    }

    async fn insert_team(conn: &mut PgConnection, team: &Team) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(team.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    async fn insert_user(conn: &mut PgConnection, user: &User) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, team_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.team_id)
        .bind(user.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    async fn insert_activity(conn: &mut PgConnection, activity: &Activity) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, user_id, activity_type, duration_minutes, calories, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(activity.id)
        .bind(activity.user_id)
        .bind(&activity.activity_type)
        .bind(activity.duration_minutes)
        .bind(activity.calories)
        .bind(activity.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    async fn insert_workout(conn: &mut PgConnection, workout: &Workout) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO workouts (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(workout.id)
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }

    async fn insert_leaderboard_entry(
        conn: &mut PgConnection,
        entry: &LeaderboardEntry,
    ) -> Result<(), SeedError> {
        sqlx::query(
            r#"
            INSERT INTO leaderboard (id, user_id, score, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(entry.score)
        .bind(entry.created_at)
        .execute(conn)
        .await?;

        Ok(())
    }
}
