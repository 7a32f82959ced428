//! Consecutive-day streak computation
//!
//! A streak is the count of consecutive calendar days, anchored at "today",
//! with at least one completed workout. Day boundaries use whole-day
//! truncation of the UTC timestamp, so two completions at 23:50 and 00:10
//! the next day count as consecutive days, not a broken 24h window.
//!
//! A calendar day is a single streak unit: multiple completions on the same
//! day advance the walk once and count once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{RecordError, WorkoutRecord};

/// Output of a streak recomputation.
/// Invariant: `longest_streak >= current_streak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
  pub current_streak: i64,
  pub longest_streak: i64,
}

/// Compute the current streak from a user's workout records.
///
/// `today` is injected by the caller; the walk never reads the wall clock.
/// `previous_longest` is the persisted high-water mark, which only ever
/// rises. A record set with no completed entry within one day of `today`
/// yields a zero current streak; a lapsed streak resets silently.
pub fn compute_streak(
  records: &[WorkoutRecord],
  previous_longest: i64,
  today: DateTime<Utc>,
) -> Result<StreakSummary, RecordError> {
  for record in records {
    record.validate()?;
  }

  let today_day = today.date_naive();

  // Completed calendar days, most recent first, deduplicated
  let mut days: Vec<_> = records
    .iter()
    .filter(|r| r.completed)
    .map(|r| r.day())
    .filter(|d| *d <= today_day) // future-dated records never anchor a streak
    .collect();
  days.sort_unstable();
  days.dedup();

  let mut current_streak = 0i64;
  let mut checkpoint = today_day;

  for day in days.iter().rev() {
    let days_diff = (checkpoint - *day).num_days();
    if days_diff == 0 || days_diff == 1 {
      current_streak += 1;
      checkpoint = *day;
    } else {
      break;
    }
  }

  Ok(StreakSummary {
    current_streak,
    longest_streak: previous_longest.max(current_streak),
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
