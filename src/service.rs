//! Record store operations
//!
//! The storage-access layer between the pure analytics core and SQLite.
//! Every function takes the shared pool handle plus, where time matters, an
//! explicit "today" from the caller. Recomputed goals and newly unlocked
//! achievements are persisted here; the core itself never writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::ProgressReport;
use crate::db::DbPool;
use crate::leaderboard::{
  compute_leaderboard, rank_user, LeaderboardEntry, Period, RankReport, UserSnapshot,
};
use crate::models::{
  Achievement, FitnessLevel, Goals, NewWorkoutRecord, RecordError, UserProfile, WorkoutRecord,
};
use crate::streak::{compute_streak, StreakSummary};

/// ---------------------------------------------------------------------------
/// Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("invalid workout record: {0}")]
  InvalidRecord(#[from] RecordError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// ---------------------------------------------------------------------------
/// Users
/// ---------------------------------------------------------------------------

pub async fn create_user(
  db: &DbPool,
  name: &str,
  email: &str,
  fitness_level: FitnessLevel,
) -> ServiceResult<UserProfile> {
  let result = sqlx::query("INSERT INTO users (name, email, fitness_level) VALUES (?1, ?2, ?3)")
    .bind(name)
    .bind(email)
    .bind(fitness_level.to_string())
    .execute(db)
    .await?;

  let user_id = result.last_insert_rowid();

  // Every account starts with the default goal targets
  sqlx::query("INSERT INTO goals (user_id) VALUES (?1)")
    .bind(user_id)
    .execute(db)
    .await?;

  tracing::info!(user_id, "user created");
  get_user(db, user_id).await
}

pub async fn get_user(db: &DbPool, user_id: i64) -> ServiceResult<UserProfile> {
  let row: Option<(i64, String, String, String, Option<DateTime<Utc>>)> = sqlx::query_as(
    "SELECT id, name, email, fitness_level, created_at FROM users WHERE id = ?1",
  )
  .bind(user_id)
  .fetch_optional(db)
  .await?;

  row
    .map(row_to_profile)
    .ok_or(ServiceError::NotFound("user"))
}

/// All users, for community views
pub async fn list_community_users(db: &DbPool) -> ServiceResult<Vec<UserProfile>> {
  let rows: Vec<(i64, String, String, String, Option<DateTime<Utc>>)> = sqlx::query_as(
    "SELECT id, name, email, fitness_level, created_at FROM users ORDER BY created_at DESC",
  )
  .fetch_all(db)
  .await?;

  Ok(rows.into_iter().map(row_to_profile).collect())
}

fn row_to_profile(
  (id, name, email, fitness_level, created_at): (i64, String, String, String, Option<DateTime<Utc>>),
) -> UserProfile {
  UserProfile {
    id,
    name,
    email,
    fitness_level: fitness_level.parse().unwrap_or_default(),
    created_at,
  }
}

/// ---------------------------------------------------------------------------
/// Workout Records
/// ---------------------------------------------------------------------------

/// Log a workout. Input is validated and defaulted at this boundary so the
/// analytics core only ever sees well-formed records.
pub async fn add_workout(
  db: &DbPool,
  user_id: i64,
  new: NewWorkoutRecord,
  now: DateTime<Utc>,
) -> ServiceResult<WorkoutRecord> {
  get_user(db, user_id).await?;
  let record = new.normalized(now)?;

  let result = sqlx::query(
    r#"
    INSERT INTO workouts (user_id, exercise, sets, reps, completed, date, calories_per_set)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
  )
  .bind(user_id)
  .bind(&record.exercise)
  .bind(record.sets)
  .bind(record.reps)
  .bind(record.completed)
  .bind(record.date)
  .bind(record.calories_per_set)
  .execute(db)
  .await?;

  fetch_workout(db, result.last_insert_rowid()).await
}

/// Flip the `completed` flag - the one permitted mutation of a record
pub async fn complete_workout(
  db: &DbPool,
  user_id: i64,
  workout_id: i64,
) -> ServiceResult<WorkoutRecord> {
  let result = sqlx::query("UPDATE workouts SET completed = 1 WHERE id = ?1 AND user_id = ?2")
    .bind(workout_id)
    .bind(user_id)
    .execute(db)
    .await?;

  if result.rows_affected() == 0 {
    return Err(ServiceError::NotFound("workout"));
  }

  fetch_workout(db, workout_id).await
}

/// Explicit removal is the only way a record leaves the store
pub async fn remove_workout(db: &DbPool, user_id: i64, workout_id: i64) -> ServiceResult<()> {
  let result = sqlx::query("DELETE FROM workouts WHERE id = ?1 AND user_id = ?2")
    .bind(workout_id)
    .bind(user_id)
    .execute(db)
    .await?;

  if result.rows_affected() == 0 {
    return Err(ServiceError::NotFound("workout"));
  }
  Ok(())
}

pub async fn get_workouts(db: &DbPool, user_id: i64) -> ServiceResult<Vec<WorkoutRecord>> {
  let records = sqlx::query_as::<_, WorkoutRecord>(
    r#"
    SELECT id, user_id, exercise, sets, reps, completed, date, calories_per_set, created_at
    FROM workouts
    WHERE user_id = ?1
    ORDER BY date DESC
    "#,
  )
  .bind(user_id)
  .fetch_all(db)
  .await?;

  Ok(records)
}

async fn fetch_workout(db: &DbPool, workout_id: i64) -> ServiceResult<WorkoutRecord> {
  sqlx::query_as::<_, WorkoutRecord>(
    r#"
    SELECT id, user_id, exercise, sets, reps, completed, date, calories_per_set, created_at
    FROM workouts
    WHERE id = ?1
    "#,
  )
  .bind(workout_id)
  .fetch_optional(db)
  .await?
  .ok_or(ServiceError::NotFound("workout"))
}

/// ---------------------------------------------------------------------------
/// Goals
/// ---------------------------------------------------------------------------

pub async fn get_goals(db: &DbPool, user_id: i64) -> ServiceResult<Goals> {
  fetch_goals(db, user_id)
    .await?
    .ok_or(ServiceError::NotFound("user"))
}

async fn fetch_goals(db: &DbPool, user_id: i64) -> Result<Option<Goals>, sqlx::Error> {
  sqlx::query_as::<_, Goals>(
    r#"
    SELECT daily_workouts, weekly_workouts, monthly_workouts,
           current_streak, longest_streak, total_workouts, total_calories_burned
    FROM goals
    WHERE user_id = ?1
    "#,
  )
  .bind(user_id)
  .fetch_optional(db)
  .await
}

/// Partial update of the goal targets; unspecified targets are untouched
pub async fn update_goal_targets(
  db: &DbPool,
  user_id: i64,
  daily_workouts: Option<i64>,
  weekly_workouts: Option<i64>,
  monthly_workouts: Option<i64>,
) -> ServiceResult<Goals> {
  let result = sqlx::query(
    r#"
    UPDATE goals SET
      daily_workouts = COALESCE(?1, daily_workouts),
      weekly_workouts = COALESCE(?2, weekly_workouts),
      monthly_workouts = COALESCE(?3, monthly_workouts),
      updated_at = CURRENT_TIMESTAMP
    WHERE user_id = ?4
    "#,
  )
  .bind(daily_workouts)
  .bind(weekly_workouts)
  .bind(monthly_workouts)
  .bind(user_id)
  .execute(db)
  .await?;

  if result.rows_affected() == 0 {
    return Err(ServiceError::NotFound("user"));
  }

  get_goals(db, user_id).await
}

/// ---------------------------------------------------------------------------
/// Streak and Analytics Recomputation
/// ---------------------------------------------------------------------------

/// Recompute the streak and lifetime totals from the record snapshot and
/// persist them. Triggered by workout completion or an explicit request,
/// never by a timer.
pub async fn update_streak(
  db: &DbPool,
  user_id: i64,
  today: DateTime<Utc>,
) -> ServiceResult<StreakSummary> {
  let goals = get_goals(db, user_id).await?;
  let records = get_workouts(db, user_id).await?;

  let summary = compute_streak(&records, goals.longest_streak, today)?;

  let completed: Vec<_> = records.iter().filter(|r| r.completed).collect();
  let total_workouts = completed.len() as i64;
  let total_calories: f64 = completed.iter().map(|r| r.calories_per_set).sum();

  sqlx::query(
    r#"
    UPDATE goals SET
      current_streak = ?1,
      longest_streak = ?2,
      total_workouts = ?3,
      total_calories_burned = ?4,
      updated_at = CURRENT_TIMESTAMP
    WHERE user_id = ?5
    "#,
  )
  .bind(summary.current_streak)
  .bind(summary.longest_streak)
  .bind(total_workouts)
  .bind(total_calories)
  .bind(user_id)
  .execute(db)
  .await?;

  tracing::debug!(
    user_id,
    current = summary.current_streak,
    longest = summary.longest_streak,
    "streak recomputed"
  );

  Ok(summary)
}

/// Build the full progress report and persist any newly crossed achievement
/// thresholds. The returned report carries the stored achievement set, so a
/// badge unlocked during an earlier peak survives later metric drops.
pub async fn get_analytics(
  db: &DbPool,
  user_id: i64,
  today: DateTime<Utc>,
) -> ServiceResult<ProgressReport> {
  let goals = get_goals(db, user_id).await?;
  let records = get_workouts(db, user_id).await?;

  let mut report = ProgressReport::compute(&records, &goals, today)?;

  for achievement in &report.achievements {
    sqlx::query(
      r#"
      INSERT OR IGNORE INTO achievements (user_id, name, description, icon, unlocked_at)
      VALUES (?1, ?2, ?3, ?4, ?5)
      "#,
    )
    .bind(user_id)
    .bind(&achievement.name)
    .bind(&achievement.description)
    .bind(&achievement.icon)
    .bind(achievement.unlocked_at)
    .execute(db)
    .await?;
  }

  let stored: Vec<(String, String, String, Option<DateTime<Utc>>)> = sqlx::query_as(
    r#"
    SELECT name, description, icon, unlocked_at
    FROM achievements
    WHERE user_id = ?1
    ORDER BY unlocked_at, id
    "#,
  )
  .bind(user_id)
  .fetch_all(db)
  .await?;

  report.achievements = stored
    .into_iter()
    .map(|(name, description, icon, unlocked_at)| Achievement {
      name,
      description,
      icon,
      unlocked_at,
    })
    .collect();

  Ok(report)
}

/// ---------------------------------------------------------------------------
/// Leaderboard
/// ---------------------------------------------------------------------------

pub async fn get_leaderboard(
  db: &DbPool,
  period: Period,
  limit: usize,
  today: DateTime<Utc>,
) -> ServiceResult<Vec<LeaderboardEntry>> {
  let snapshots = load_snapshots(db).await?;
  Ok(compute_leaderboard(&snapshots, period, today, limit))
}

pub async fn get_ranking(
  db: &DbPool,
  user_id: i64,
  period: Period,
  today: DateTime<Utc>,
) -> ServiceResult<RankReport> {
  let snapshots = load_snapshots(db).await?;
  rank_user(&snapshots, period, today, user_id).ok_or(ServiceError::NotFound("user"))
}

async fn load_snapshots(db: &DbPool) -> ServiceResult<Vec<UserSnapshot>> {
  let rows: Vec<(i64, String, String)> =
    sqlx::query_as("SELECT id, name, fitness_level FROM users ORDER BY id")
      .fetch_all(db)
      .await?;

  let mut snapshots = Vec::with_capacity(rows.len());
  for (user_id, name, fitness_level) in rows {
    let goals = fetch_goals(db, user_id).await?.unwrap_or_default();
    let records = get_workouts(db, user_id).await?;

    snapshots.push(UserSnapshot {
      user_id,
      name,
      fitness_level: fitness_level.parse().unwrap_or_default(),
      goals,
      records,
    });
  }

  Ok(snapshots)
}

/// ---------------------------------------------------------------------------
/// Community Feed
/// ---------------------------------------------------------------------------

/// A recently completed workout, attributed for the community view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
  pub name: String,
  pub fitness_level: FitnessLevel,
  pub exercise: String,
  pub sets: i64,
  pub reps: i64,
  pub date: DateTime<Utc>,
  pub calories: f64,
}

pub async fn community_feed(db: &DbPool, limit: i64) -> ServiceResult<Vec<FeedItem>> {
  let rows: Vec<(String, String, String, i64, i64, DateTime<Utc>, f64)> = sqlx::query_as(
    r#"
    SELECT u.name, u.fitness_level, w.exercise, w.sets, w.reps, w.date, w.calories_per_set
    FROM workouts w
    JOIN users u ON u.id = w.user_id
    WHERE w.completed = 1
    ORDER BY w.date DESC
    LIMIT ?1
    "#,
  )
  .bind(limit)
  .fetch_all(db)
  .await?;

  Ok(
    rows
      .into_iter()
      .map(|(name, fitness_level, exercise, sets, reps, date, calories)| FeedItem {
        name,
        fitness_level: fitness_level.parse().unwrap_or_default(),
        exercise,
        sets,
        reps,
        date,
        calories,
      })
      .collect(),
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
