//! The demo dataset, described by natural keys.
//!
//! Users point at teams by team name; activities and leaderboard entries
//! point at users by email. Ids are only assigned when a [`SeedPlan`] is
//! built from the dataset.
//!
//! [`SeedPlan`]: crate::plan::SeedPlan

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeed {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSeed {
    pub name: String,
    pub email: String,
    /// Name of the team this user belongs to.
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySeed {
    /// Email of the user who logged the activity.
    pub user: String,
    pub activity_type: String,
    pub duration_minutes: i32,
    pub calories: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSeed {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSeed {
    /// Email of the ranked user.
    pub user: String,
    pub score: i32,
}

/// A complete set of records to replace the database contents with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoDataset {
    pub teams: Vec<TeamSeed>,
    pub users: Vec<UserSeed>,
    pub activities: Vec<ActivitySeed>,
    pub workouts: Vec<WorkoutSeed>,
    pub leaderboard: Vec<LeaderboardSeed>,
}

impl DemoDataset {
    /// The built-in OctoFit demo data: two teams of superheroes.
    pub fn octofit() -> Self {
        let team = |name: &str| TeamSeed {
            name: name.to_string(),
        };
        let user = |name: &str, email: &str, team: &str| UserSeed {
            name: name.to_string(),
            email: email.to_string(),
            team: team.to_string(),
        };
        let activity = |user: &str, activity_type: &str, duration_minutes, calories| ActivitySeed {
            user: user.to_string(),
            activity_type: activity_type.to_string(),
            duration_minutes,
            calories,
        };
        let workout = |name: &str, description: &str| WorkoutSeed {
            name: name.to_string(),
            description: description.to_string(),
        };
        let entry = |user: &str, score| LeaderboardSeed {
            user: user.to_string(),
            score,
        };

        Self {
            teams: vec![team("Marvel"), team("DC")],
            users: vec![
                user("Tony Stark", "tony@marvel.com", "Marvel"),
                user("Steve Rogers", "steve@marvel.com", "Marvel"),
                user("Bruce Wayne", "bruce@dc.com", "DC"),
                user("Clark Kent", "clark@dc.com", "DC"),
            ],
            activities: vec![
                activity("tony@marvel.com", "Run", 30, 300),
                activity("steve@marvel.com", "Swim", 45, 400),
                activity("bruce@dc.com", "Bike", 60, 500),
                activity("clark@dc.com", "Yoga", 50, 200),
            ],
            workouts: vec![
                workout("Morning Cardio", "Cardio for all"),
                workout("Strength Training", "Strength for all"),
            ],
            leaderboard: vec![
                entry("tony@marvel.com", 1000),
                entry("steve@marvel.com", 900),
                entry("bruce@dc.com", 1100),
                entry("clark@dc.com", 950),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Total number of records the dataset will insert.
    pub fn record_count(&self) -> usize {
        self.teams.len()
            + self.users.len()
            + self.activities.len()
            + self.workouts.len()
            + self.leaderboard.len()
    }
}

impl Default for DemoDataset {
    fn default() -> Self {
        Self::octofit()
    }
}
