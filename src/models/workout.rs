use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Calories credited per set when a record does not carry its own value
pub const DEFAULT_CALORIES_PER_SET: f64 = 15.0;

/// ---------------------------------------------------------------------------
/// Validation Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
  #[error("sets must be a positive integer, got {0}")]
  InvalidSets(i64),

  #[error("reps must be a positive integer, got {0}")]
  InvalidReps(i64),

  #[error("calories_per_set must be a non-negative finite number, got {0}")]
  InvalidCalories(f64),
}

/// ---------------------------------------------------------------------------
/// Workout Records
/// ---------------------------------------------------------------------------

/// A single logged workout. Immutable once created except for the
/// `completed` flag, which flips from false to true exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutRecord {
  pub id: i64,
  pub user_id: i64,
  pub exercise: String,
  pub sets: i64,
  pub reps: i64,
  pub completed: bool,
  pub date: DateTime<Utc>,
  pub calories_per_set: f64,
  pub created_at: Option<DateTime<Utc>>,
}

impl WorkoutRecord {
  /// Check the record is well-formed. Analytics fails loudly on records
  /// that slipped past the write boundary rather than propagating NaN.
  pub fn validate(&self) -> Result<(), RecordError> {
    if self.sets <= 0 {
      return Err(RecordError::InvalidSets(self.sets));
    }
    if self.reps <= 0 {
      return Err(RecordError::InvalidReps(self.reps));
    }
    if !self.calories_per_set.is_finite() || self.calories_per_set < 0.0 {
      return Err(RecordError::InvalidCalories(self.calories_per_set));
    }
    Ok(())
  }

  /// The calendar day this workout falls on (whole-day truncation)
  pub fn day(&self) -> NaiveDate {
    self.date.date_naive()
  }
}

/// For inserting new records (without id, created_at).
/// Optional fields are normalized to their defaults at the write boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkoutRecord {
  pub exercise: String,
  pub sets: i64,
  pub reps: i64,
  #[serde(default)]
  pub completed: bool,
  pub date: Option<DateTime<Utc>>,
  pub calories_per_set: Option<f64>,
}

impl NewWorkoutRecord {
  /// Validate and fill in defaults: `date` falls back to `now`,
  /// `calories_per_set` to the fixed per-set constant.
  pub fn normalized(self, now: DateTime<Utc>) -> Result<NormalizedRecord, RecordError> {
    if self.sets <= 0 {
      return Err(RecordError::InvalidSets(self.sets));
    }
    if self.reps <= 0 {
      return Err(RecordError::InvalidReps(self.reps));
    }
    let calories = self.calories_per_set.unwrap_or(DEFAULT_CALORIES_PER_SET);
    if !calories.is_finite() || calories < 0.0 {
      return Err(RecordError::InvalidCalories(calories));
    }

    Ok(NormalizedRecord {
      exercise: self.exercise,
      sets: self.sets,
      reps: self.reps,
      completed: self.completed,
      date: self.date.unwrap_or(now),
      calories_per_set: calories,
    })
  }
}

/// A validated insert shape with all defaults applied
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
  pub exercise: String,
  pub sets: i64,
  pub reps: i64,
  pub completed: bool,
  pub date: DateTime<Utc>,
  pub calories_per_set: f64,
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
