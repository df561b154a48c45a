use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub team_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// A logged exercise session belonging to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Free-form kind of exercise, e.g. "Run" or "Yoga".
    pub activity_type: String,
    pub duration_minutes: i32,
    pub calories: i32,
    pub created_at: OffsetDateTime,
}

/// A suggested workout. Not tied to any user or team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
    pub created_at: OffsetDateTime,
}

/// Team listing with its member count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
    pub member_count: i64,
}

/// A ranked leaderboard line joined with the user and their team.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LeaderboardRow {
    /// 1-based position, highest score first.
    pub rank: i64,
    pub user_id: Uuid,
    pub user_name: String,
    pub team_name: String,
    pub score: i32,
    pub activity_count: i64,
}

/// Row counts of the five record collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct TableCounts {
    pub teams: i64,
    pub users: i64,
    pub activities: i64,
    pub workouts: i64,
    pub leaderboard: i64,
}

impl TableCounts {
    pub fn total(&self) -> i64 {
        self.teams + self.users + self.activities + self.workouts + self.leaderboard
    }
}
