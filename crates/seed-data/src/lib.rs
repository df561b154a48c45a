//! Demo data seeding for the OctoFit Tracker.
//!
//! Replaces every team, user, activity, workout and leaderboard entry with a
//! fixed demonstration dataset.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let summary = Seeder::new(pool).seed(&DemoDataset::octofit()).await?;
//! ```

pub mod config;
pub mod dataset;
pub mod db;
pub mod plan;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, SeedConfig};
    pub use crate::dataset::{DatasetError, DemoDataset};
    pub use crate::db::{SeedError, SeedSummary, Seeder};
    pub use crate::plan::SeedPlan;
}
