use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user goal targets and recomputed progress counters.
///
/// The targets (`daily_workouts`, `weekly_workouts`, `monthly_workouts`) are
/// user-editable. The remaining fields are derived: they are recomputed on
/// demand from the workout records and persisted by the caller, never
/// transactionally tied to the record store. `longest_streak` is a
/// high-water mark and never decreases.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Goals {
  pub daily_workouts: i64,
  pub weekly_workouts: i64,
  pub monthly_workouts: i64,
  pub current_streak: i64,
  pub longest_streak: i64,
  pub total_workouts: i64,
  pub total_calories_burned: f64,
}

impl Default for Goals {
  fn default() -> Self {
    Self {
      daily_workouts: 1,
      weekly_workouts: 5,
      monthly_workouts: 20,
      current_streak: 0,
      longest_streak: 0,
      total_workouts: 0,
      total_calories_burned: 0.0,
    }
  }
}

/// A badge unlocked once a cumulative metric crosses a fixed threshold.
/// Achievements are permanent: once unlocked they are never revoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
  pub name: String,
  pub description: String,
  pub icon: String,
  pub unlocked_at: Option<DateTime<Utc>>,
}
