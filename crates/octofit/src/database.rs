use crate::errors::AppError;
use crate::models::{Activity, LeaderboardRow, TableCounts, TeamSummary, User, Workout};
use sqlx::PgPool;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamSummary>, AppError> {
        let teams = sqlx::query_as(
            r#"
            SELECT t.id, t.name, COUNT(u.id) AS member_count
            FROM teams t
            LEFT JOIN users u ON u.team_id = t.id
            GROUP BY t.id, t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as(
            r#"
            SELECT id, name, email, team_id, created_at
            FROM users
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as(
            r#"
            SELECT id, user_id, activity_type, duration_minutes, calories, created_at
            FROM activities
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }

    pub async fn list_workouts(&self) -> Result<Vec<Workout>, AppError> {
        let workouts = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at
            FROM workouts
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    /// Leaderboard entries ranked by score, highest first.
    ///
    /// Ties share no rank; they are broken by user name so the order is stable.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardRow>, AppError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                ROW_NUMBER() OVER (ORDER BY l.score DESC, u.name) AS rank,
                u.id AS user_id,
                u.name AS user_name,
                t.name AS team_name,
                l.score,
                (SELECT COUNT(*) FROM activities a WHERE a.user_id = u.id) AS activity_count
            FROM leaderboard l
            JOIN users u ON u.id = l.user_id
            JOIN teams t ON t.id = u.team_id
            ORDER BY rank
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn counts(&self) -> Result<TableCounts, AppError> {
        let counts = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM teams) AS teams,
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM activities) AS activities,
                (SELECT COUNT(*) FROM workouts) AS workouts,
                (SELECT COUNT(*) FROM leaderboard) AS leaderboard
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}
