//! Database integration for seeding demo data.
//!
//! The [`Seeder`] wipes the OctoFit tables and inserts a [`DemoDataset`]
//! inside one transaction.
//!
//! [`DemoDataset`]: crate::dataset::DemoDataset

mod seeder;

pub use seeder::{SeedError, SeedSummary, Seeder};
