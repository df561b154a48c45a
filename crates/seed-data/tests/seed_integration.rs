//! Integration tests for seeding the OctoFit database.
//!
//! To run these tests, you need a PostgreSQL database and the `DATABASE_URL`
//! environment variable set. Migrations are applied automatically.
//!
//! Run with: `DATABASE_URL=postgres://... cargo nextest run -p seed-data`
//!
//! Note: seeding wipes the teams, users, activities, workouts and leaderboard
//! tables. Point these tests at a throwaway database.

use octofit::database::Database;
use seed_data::dataset::{DemoDataset, UserSeed};
use seed_data::db::{SeedError, Seeder};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::collections::HashMap;
use std::env;
use tokio::process::Command;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Every test replaces the whole dataset, so they must not overlap.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Get a migrated database pool, skipping tests if DATABASE_URL is not set.
async fn get_test_pool() -> Option<(PgPool, MutexGuard<'static, ()>)> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    let guard = DB_LOCK.lock().await;
    octofit::migrate(&pool)
        .await
        .expect("Failed to apply migrations");

    Some((pool, guard))
}

#[tokio::test]
async fn test_seed_creates_expected_counts() {
    let Some((pool, _guard)) = get_test_pool().await else {
        return;
    };

    let summary = Seeder::new(pool.clone())
        .seed(&DemoDataset::octofit())
        .await
        .expect("Seed failed");

    assert_eq!(summary.teams, 2);
    assert_eq!(summary.users, 4);
    assert_eq!(summary.activities, 4);
    assert_eq!(summary.workouts, 2);
    assert_eq!(summary.leaderboard, 4);

    let counts = Database::new(pool).counts().await.unwrap();
    assert_eq!(counts.teams, 2);
    assert_eq!(counts.users, 4);
    assert_eq!(counts.activities, 4);
    assert_eq!(counts.workouts, 2);
    assert_eq!(counts.leaderboard, 4);
}

#[tokio::test]
async fn test_seed_links_users_teams_and_activities() {
    let Some((pool, _guard)) = get_test_pool().await else {
        return;
    };

    Seeder::new(pool.clone())
        .seed(&DemoDataset::octofit())
        .await
        .expect("Seed failed");

    let db = Database::new(pool);
    let teams = db.list_teams().await.unwrap();
    let users = db.list_users().await.unwrap();
    let activities = db.list_activities().await.unwrap();

    let team_names: HashMap<_, _> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    let user_team: HashMap<&str, &str> = users
        .iter()
        .map(|u| (u.name.as_str(), team_names[&u.team_id]))
        .collect();

    assert_eq!(user_team["Tony Stark"], "Marvel");
    assert_eq!(user_team["Steve Rogers"], "Marvel");
    assert_eq!(user_team["Bruce Wayne"], "DC");
    assert_eq!(user_team["Clark Kent"], "DC");
    assert!(teams.iter().all(|t| t.member_count == 2));

    let user_names: HashMap<_, _> = users.iter().map(|u| (u.id, u.name.as_str())).collect();
    let logged: Vec<(&str, &str, i32, i32)> = activities
        .iter()
        .map(|a| {
            (
                user_names[&a.user_id],
                a.activity_type.as_str(),
                a.duration_minutes,
                a.calories,
            )
        })
        .collect();

    assert_eq!(
        logged,
        [
            ("Tony Stark", "Run", 30, 300),
            ("Steve Rogers", "Swim", 45, 400),
            ("Bruce Wayne", "Bike", 60, 500),
            ("Clark Kent", "Yoga", 50, 200),
        ]
    );

    let workouts = db.list_workouts().await.unwrap();
    let workouts: Vec<(&str, &str)> = workouts
        .iter()
        .map(|w| (w.name.as_str(), w.description.as_str()))
        .collect();
    assert_eq!(
        workouts,
        [
            ("Morning Cardio", "Cardio for all"),
            ("Strength Training", "Strength for all"),
        ]
    );
}

#[tokio::test]
async fn test_leaderboard_ranks_by_score() {
    let Some((pool, _guard)) = get_test_pool().await else {
        return;
    };

    Seeder::new(pool.clone())
        .seed(&DemoDataset::octofit())
        .await
        .expect("Seed failed");

    let rows = Database::new(pool).leaderboard().await.unwrap();
    let ranking: Vec<(i64, &str, &str, i32)> = rows
        .iter()
        .map(|r| (r.rank, r.user_name.as_str(), r.team_name.as_str(), r.score))
        .collect();

    assert_eq!(
        ranking,
        [
            (1, "Bruce Wayne", "DC", 1100),
            (2, "Tony Stark", "Marvel", 1000),
            (3, "Clark Kent", "DC", 950),
            (4, "Steve Rogers", "Marvel", 900),
        ]
    );
    assert!(rows.iter().all(|r| r.activity_count == 1));
}

#[tokio::test]
async fn test_reseed_keeps_content_with_new_ids() {
    let Some((pool, _guard)) = get_test_pool().await else {
        return;
    };

    let seeder = Seeder::new(pool.clone());
    let db = Database::new(pool);

    seeder.seed(&DemoDataset::octofit()).await.expect("First seed failed");
    let first_users = db.list_users().await.unwrap();
    let first_counts = db.counts().await.unwrap();

    let summary = seeder
        .seed(&DemoDataset::octofit())
        .await
        .expect("Second seed failed");
    let second_users = db.list_users().await.unwrap();
    let second_counts = db.counts().await.unwrap();

    assert_eq!(summary.deleted as i64, first_counts.total());
    assert_eq!(first_counts, second_counts);
    assert_eq!(first_users.len(), second_users.len());
    for (a, b) in first_users.iter().zip(&second_users) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.email, b.email);
        assert_ne!(a.id, b.id);
    }
}

#[tokio::test]
async fn test_rejected_insert_rolls_back() {
    let Some((pool, _guard)) = get_test_pool().await else {
        return;
    };

    let seeder = Seeder::new(pool.clone());
    let db = Database::new(pool);

    seeder.seed(&DemoDataset::octofit()).await.expect("Seed failed");
    let before = db.list_users().await.unwrap();

    // Duplicate email violates the users.email unique constraint.
    let mut dataset = DemoDataset::octofit();
    dataset.users.push(UserSeed {
        name: "Tony Stark (clone)".to_string(),
        email: "tony@marvel.com".to_string(),
        team: "Marvel".to_string(),
    });

    let err = seeder.seed(&dataset).await.unwrap_err();
    assert!(matches!(err, SeedError::Database(_)), "unexpected error: {err}");

    let after = db.list_users().await.unwrap();
    assert_eq!(before, after);
    assert_eq!(db.counts().await.unwrap().total(), 16);
}

#[tokio::test]
async fn test_dangling_reference_never_touches_database() {
    let Some((pool, _guard)) = get_test_pool().await else {
        return;
    };

    let seeder = Seeder::new(pool.clone());
    let db = Database::new(pool);

    seeder.seed(&DemoDataset::octofit()).await.expect("Seed failed");

    let mut dataset = DemoDataset::octofit();
    dataset.users[0].team = "Avengers".to_string();

    let err = seeder.seed(&dataset).await.unwrap_err();
    assert!(matches!(err, SeedError::UnknownTeam(ref name) if name == "Avengers"));
    assert_eq!(db.counts().await.unwrap().users, 4);
}

#[tokio::test]
async fn test_clear_all_empties_every_table() {
    let Some((pool, _guard)) = get_test_pool().await else {
        return;
    };

    let seeder = Seeder::new(pool.clone());
    seeder.seed(&DemoDataset::octofit()).await.expect("Seed failed");

    let deleted = seeder.clear_all().await.expect("Clear failed");
    assert_eq!(deleted, 16);

    let counts = Database::new(pool).counts().await.unwrap();
    assert_eq!(counts.total(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_clear_all_waits_for_running_seed() {
    let Some((pool, _guard)) = get_test_pool().await else {
        return;
    };

    let seeder = Seeder::new(pool.clone());
    let clearer = Seeder::new(pool.clone());
    let dataset = DemoDataset::octofit();
    let db = Database::new(pool);

    for _ in 0..20 {
        let (seeded, cleared) = tokio::join!(seeder.seed(&dataset), clearer.clear_all());
        seeded.expect("Seed failed while clearing");
        cleared.expect("Clear failed while seeding");

        let total = db.counts().await.unwrap().total();
        assert!(total == 0 || total == 16, "unexpected row total {total}");
    }
}

#[tokio::test]
async fn test_seed_binary_prints_only_confirmation() {
    let Some((_pool, _guard)) = get_test_pool().await else {
        return;
    };

    let output = Command::new(env!("CARGO_BIN_EXE_seed"))
        .env("RUST_LOG", "info")
        .env_remove("SEED_DATASET")
        .output()
        .await
        .expect("Failed to run seed binary");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Database populated with test data.\n"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("Seed completed!"));
}

#[tokio::test]
async fn test_seed_binary_failure_keeps_stdout_empty() {
    let Some((_pool, _guard)) = get_test_pool().await else {
        return;
    };

    let mut dataset = DemoDataset::octofit();
    dataset.users[0].team = "Nope".to_string();
    let path = env::temp_dir().join(format!("octofit-{}.json", Uuid::new_v4()));
    std::fs::write(&path, serde_json::to_string(&dataset).unwrap()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_seed"))
        .env("RUST_LOG", "info")
        .env("SEED_DATASET", &path)
        .output()
        .await
        .expect("Failed to run seed binary");
    let _ = std::fs::remove_file(&path);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "stdout: {}", String::from_utf8_lossy(&output.stdout));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown team: Nope"));
}
