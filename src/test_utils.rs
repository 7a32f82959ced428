//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed helpers for users and workout records
//! - Mock data factories
//! - A fixed clock for deterministic date math

use crate::models::NewWorkoutRecord;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert a user together with its default goals row, returning the user id
pub async fn seed_test_user(pool: &SqlitePool, name: &str, email: &str) -> i64 {
  let result = sqlx::query("INSERT INTO users (name, email) VALUES (?1, ?2)")
    .bind(name)
    .bind(email)
    .execute(pool)
    .await
    .expect("Failed to insert test user");

  let user_id = result.last_insert_rowid();

  sqlx::query("INSERT INTO goals (user_id) VALUES (?1)")
    .bind(user_id)
    .execute(pool)
    .await
    .expect("Failed to insert test goals");

  user_id
}

/// Insert a completed workout on an explicit date, returning the workout id
pub async fn seed_completed_workout(
  pool: &SqlitePool,
  user_id: i64,
  date: DateTime<Utc>,
  calories_per_set: f64,
) -> i64 {
  let result = sqlx::query(
    r#"
    INSERT INTO workouts (user_id, exercise, sets, reps, completed, date, calories_per_set)
    VALUES (?1, 'Pushups', 3, 12, 1, ?2, ?3)
    "#,
  )
  .bind(user_id)
  .bind(date)
  .bind(calories_per_set)
  .execute(pool)
  .await
  .expect("Failed to insert test workout");

  result.last_insert_rowid()
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// A well-formed workout submission with everything defaultable left unset
pub fn mock_new_workout() -> NewWorkoutRecord {
  NewWorkoutRecord {
    exercise: "Squats".to_string(),
    sets: 3,
    reps: 10,
    completed: false,
    date: None,
    calories_per_set: None,
  }
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// A fixed "today" so date-window assertions never depend on the wall clock
pub fn fixed_today() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[tokio::test]
  #[serial]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('users', 'workouts', 'goals', 'achievements')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_seed_helpers_insert_rows() {
    let pool = setup_test_db().await;

    let user_id = seed_test_user(&pool, "Ana", "ana@example.com").await;
    seed_completed_workout(&pool, user_id, fixed_today(), 15.0).await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE user_id = ?1")
      .bind(user_id)
      .fetch_one(&pool)
      .await
      .expect("Failed to count workouts");
    assert_eq!(count, 1);

    teardown_test_db(pool).await;
  }
}
