//! Resolves a [`DemoDataset`] into rows ready for insertion.

use std::collections::HashMap;

use octofit::models::{Activity, LeaderboardEntry, Team, User, Workout};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::dataset::DemoDataset;
use crate::db::SeedError;

/// Rows for every collection, with ids assigned and references resolved.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub teams: Vec<Team>,
    pub users: Vec<User>,
    pub activities: Vec<Activity>,
    pub workouts: Vec<Workout>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl SeedPlan {
    /// Builds a plan stamped with the current time.
    pub fn build(dataset: &DemoDataset) -> Result<Self, SeedError> {
        Self::build_at(dataset, OffsetDateTime::now_utc())
    }

    /// Builds a plan with fresh ids. Rows within a collection get `created_at`
    /// one microsecond apart so dataset order survives in the database.
    pub fn build_at(dataset: &DemoDataset, base_time: OffsetDateTime) -> Result<Self, SeedError> {
        let stamp = |i: usize| base_time + Duration::microseconds(i as i64);

        let teams: Vec<Team> = dataset
            .teams
            .iter()
            .enumerate()
            .map(|(i, t)| Team {
                id: Uuid::new_v4(),
                name: t.name.clone(),
                created_at: stamp(i),
            })
            .collect();
        let team_ids: HashMap<&str, Uuid> =
            teams.iter().map(|t| (t.name.as_str(), t.id)).collect();

        let users = dataset
            .users
            .iter()
            .enumerate()
            .map(|(i, u)| -> Result<User, SeedError> {
                let team_id = team_ids
                    .get(u.team.as_str())
                    .copied()
                    .ok_or_else(|| SeedError::UnknownTeam(u.team.clone()))?;
                Ok(User {
                    id: Uuid::new_v4(),
                    name: u.name.clone(),
                    email: u.email.clone(),
                    team_id,
                    created_at: stamp(i),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let user_ids: HashMap<&str, Uuid> =
            users.iter().map(|u| (u.email.as_str(), u.id)).collect();
        let resolve_user = |email: &str| {
            user_ids
                .get(email)
                .copied()
                .ok_or_else(|| SeedError::UnknownUser(email.to_string()))
        };

        let activities = dataset
            .activities
            .iter()
            .enumerate()
            .map(|(i, a)| -> Result<Activity, SeedError> {
                Ok(Activity {
                    id: Uuid::new_v4(),
                    user_id: resolve_user(a.user.as_str())?,
                    activity_type: a.activity_type.clone(),
                    duration_minutes: a.duration_minutes,
                    calories: a.calories,
                    created_at: stamp(i),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let workouts = dataset
            .workouts
            .iter()
            .enumerate()
            .map(|(i, w)| Workout {
                id: Uuid::new_v4(),
                name: w.name.clone(),
                description: w.description.clone(),
                created_at: stamp(i),
            })
            .collect();

        let leaderboard = dataset
            .leaderboard
            .iter()
            .enumerate()
            .map(|(i, l)| -> Result<LeaderboardEntry, SeedError> {
                Ok(LeaderboardEntry {
                    id: Uuid::new_v4(),
                    user_id: resolve_user(l.user.as_str())?,
                    score: l.score,
                    created_at: stamp(i),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            teams,
            users,
            activities,
            workouts,
            leaderboard,
        })
    }
}
