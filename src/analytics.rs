//! Progress analytics over a user's workout records
//!
//! Combines the streak computation with lifetime totals, fixed-threshold
//! achievement badges, and weekly/monthly rollups into a single
//! JSON-serializable report. Everything here is a pure function over an
//! already-fetched snapshot: "today" is always injected by the caller.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Achievement, Goals, RecordError, WorkoutRecord};
use crate::streak::compute_streak;

/// ---------------------------------------------------------------------------
/// Achievement Thresholds
/// ---------------------------------------------------------------------------

const WORKOUT_BADGES: [(i64, &str, &str, &str); 4] = [
  (1, "First Steps", "Completed your first workout!", "🎯"),
  (10, "Getting Started", "Completed 10 workouts!", "🔥"),
  (50, "Consistent", "Completed 50 workouts!", "💪"),
  (100, "Dedicated", "Completed 100 workouts!", "🏆"),
];

const STREAK_BADGES: [(i64, &str, &str, &str); 2] = [
  (7, "Week Warrior", "7-day workout streak!", "⚡"),
  (30, "Month Master", "30-day workout streak!", "👑"),
];

const CALORIE_BADGES: [(f64, &str, &str, &str); 2] = [
  (1000.0, "Calorie Burner", "Burned 1000+ calories!", "🔥"),
  (10000.0, "Calorie King", "Burned 10,000+ calories!", "💥"),
];

/// Badges whose thresholds the given metrics have crossed. Each threshold is
/// independent, so one user can hold many at once, and the sets are
/// monotonic: reaching 100 workouts implies the 1/10/50 badges as well.
pub fn unlocked_achievements(
  total_workouts: i64,
  current_streak: i64,
  total_calories: f64,
  unlocked_at: DateTime<Utc>,
) -> Vec<Achievement> {
  let mut achievements = Vec::new();

  let mut push = |name: &str, description: &str, icon: &str| {
    achievements.push(Achievement {
      name: name.to_string(),
      description: description.to_string(),
      icon: icon.to_string(),
      unlocked_at: Some(unlocked_at),
    });
  };

  for (threshold, name, description, icon) in WORKOUT_BADGES {
    if total_workouts >= threshold {
      push(name, description, icon);
    }
  }
  for (threshold, name, description, icon) in STREAK_BADGES {
    if current_streak >= threshold {
      push(name, description, icon);
    }
  }
  for (threshold, name, description, icon) in CALORIE_BADGES {
    if total_calories >= threshold {
      push(name, description, icon);
    }
  }

  achievements
}

/// ---------------------------------------------------------------------------
/// Rollup Buckets
/// ---------------------------------------------------------------------------

/// One Sunday-aligned 7-day window. "Week 4" is the current week,
/// "Week 1" the oldest of the last four.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyBucket {
  pub week: String,
  pub workouts_completed: i64,
  pub calories_burned: f64,
  /// Distinct calendar days with at least one completion in this window
  pub streak_days: i64,
}

/// One calendar month, first day through last day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBucket {
  pub month: String,
  pub workouts_completed: i64,
  pub calories_burned: f64,
  /// Approximate workouts per week (count / 4)
  pub average_weekly: f64,
}

/// Summary of a recently completed workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentWorkout {
  pub exercise: String,
  pub date: DateTime<Utc>,
  pub sets: i64,
  pub reps: i64,
  pub calories: f64,
}

/// ---------------------------------------------------------------------------
/// Progress Report
/// ---------------------------------------------------------------------------

/// The full analytics report for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
  pub total_workouts: i64,
  pub total_calories_burned: f64,
  pub current_streak: i64,
  pub longest_streak: i64,
  pub achievements: Vec<Achievement>,
  pub weekly_progress: Vec<WeeklyBucket>,
  pub monthly_progress: Vec<MonthlyBucket>,
  pub goals: Goals,
  pub recent_workouts: Vec<RecentWorkout>,
}

impl ProgressReport {
  /// Build the report from a user's records and persisted goals.
  ///
  /// A user with zero completed records produces an all-zero report with an
  /// empty achievement list; that is a valid output, not an error. Invalid
  /// records fail loudly instead.
  pub fn compute(
    records: &[WorkoutRecord],
    goals: &Goals,
    today: DateTime<Utc>,
  ) -> Result<Self, RecordError> {
    for record in records {
      record.validate()?;
    }

    let mut completed: Vec<&WorkoutRecord> =
      records.iter().filter(|r| r.completed).collect();
    completed.sort_by(|a, b| b.date.cmp(&a.date));

    let total_workouts = completed.len() as i64;
    let total_calories: f64 = completed.iter().map(|r| r.calories_per_set).sum();

    let streak = compute_streak(records, goals.longest_streak, today)?;

    let today_day = today.date_naive();
    let weekly_progress = weekly_buckets(&completed, today_day);
    let monthly_progress = monthly_buckets(&completed, today_day);

    let achievements =
      unlocked_achievements(total_workouts, streak.current_streak, total_calories, today);

    let recent_workouts = completed
      .iter()
      .take(10)
      .map(|r| RecentWorkout {
        exercise: r.exercise.clone(),
        date: r.date,
        sets: r.sets,
        reps: r.reps,
        calories: r.calories_per_set,
      })
      .collect();

    Ok(Self {
      total_workouts,
      total_calories_burned: total_calories,
      current_streak: streak.current_streak,
      longest_streak: streak.longest_streak,
      achievements,
      weekly_progress,
      monthly_progress,
      goals: goals.clone(),
      recent_workouts,
    })
  }

  /// Serialize to JSON for API consumers
  pub fn to_json(&self) -> String {
    serde_json::to_string_pretty(self).unwrap_or_default()
  }
}

/// Rollups for the last 4 Sunday-aligned weeks, most recent first.
/// Windows never overlap: each record falls in exactly one week.
fn weekly_buckets(completed: &[&WorkoutRecord], today: NaiveDate) -> Vec<WeeklyBucket> {
  let days_from_sunday = today.weekday().num_days_from_sunday() as i64;
  let mut buckets = Vec::with_capacity(4);

  for i in 0..4 {
    let week_start = today - Duration::days(days_from_sunday + i * 7);
    let week_end = week_start + Duration::days(6);

    let in_window: Vec<_> = completed
      .iter()
      .filter(|r| {
        let d = r.day();
        d >= week_start && d <= week_end
      })
      .collect();

    let mut active_days: Vec<_> = in_window.iter().map(|r| r.day()).collect();
    active_days.sort_unstable();
    active_days.dedup();

    buckets.push(WeeklyBucket {
      week: format!("Week {}", 4 - i),
      workouts_completed: in_window.len() as i64,
      calories_burned: in_window.iter().map(|r| r.calories_per_set).sum(),
      streak_days: active_days.len() as i64,
    });
  }

  buckets
}

/// Rollups for the last 6 calendar months, most recent first
fn monthly_buckets(completed: &[&WorkoutRecord], today: NaiveDate) -> Vec<MonthlyBucket> {
  let mut buckets = Vec::with_capacity(6);

  for i in 0..6 {
    let Some((month_start, month_end)) = month_window(today, i) else {
      continue;
    };

    let in_window: Vec<_> = completed
      .iter()
      .filter(|r| {
        let d = r.day();
        d >= month_start && d <= month_end
      })
      .collect();

    buckets.push(MonthlyBucket {
      month: month_start.format("%b %Y").to_string(),
      workouts_completed: in_window.len() as i64,
      calories_burned: in_window.iter().map(|r| r.calories_per_set).sum(),
      average_weekly: in_window.len() as f64 / 4.0,
    });
  }

  buckets
}

/// First and last day of the month `months_back` months before `today`
fn month_window(today: NaiveDate, months_back: i32) -> Option<(NaiveDate, NaiveDate)> {
  let total_months = today.year() * 12 + today.month0() as i32 - months_back;
  let year = total_months.div_euclid(12);
  let month = total_months.rem_euclid(12) as u32 + 1;

  let start = NaiveDate::from_ymd_opt(year, month, 1)?;
  let next_month_start = if month == 12 {
    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
  } else {
    NaiveDate::from_ymd_opt(year, month + 1, 1)?
  };

  Some((start, next_month_start - Duration::days(1)))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn record(id: i64, date: DateTime<Utc>, completed: bool, calories: f64) -> WorkoutRecord {
    WorkoutRecord {
      id,
      user_id: 1,
      exercise: "Pushups".to_string(),
      sets: 3,
      reps: 12,
      completed,
      date,
      calories_per_set: calories,
      created_at: None,
    }
  }

  fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 8, 0, 0).unwrap()
  }

  #[test]
  fn test_two_day_scenario() {
    // Completions on Jan 9 and Jan 10 with "today" = Jan 10
    let today = day(2024, 1, 10);
    let records = vec![
      record(1, day(2024, 1, 10), true, 15.0),
      record(2, day(2024, 1, 9), true, 15.0),
    ];

    let report = ProgressReport::compute(&records, &Goals::default(), today).unwrap();
    assert_eq!(report.current_streak, 2);
    assert_eq!(report.total_workouts, 2);
    assert_eq!(report.total_calories_burned, 30.0);
    assert_eq!(report.recent_workouts.len(), 2);

    // First Steps only: 2 workouts, 2-day streak, 30 calories
    assert_eq!(report.achievements.len(), 1);
    assert_eq!(report.achievements[0].name, "First Steps");
  }

  #[test]
  fn test_empty_record_set_is_valid_all_zero_report() {
    let today = day(2024, 1, 10);
    let report = ProgressReport::compute(&[], &Goals::default(), today).unwrap();

    assert_eq!(report.total_workouts, 0);
    assert_eq!(report.total_calories_burned, 0.0);
    assert_eq!(report.current_streak, 0);
    assert!(report.achievements.is_empty());
    assert!(report.recent_workouts.is_empty());
    assert_eq!(report.weekly_progress.len(), 4);
    assert_eq!(report.monthly_progress.len(), 6);
    assert!(report.weekly_progress.iter().all(|w| w.workouts_completed == 0));
  }

  #[test]
  fn test_incomplete_records_do_not_count() {
    let today = day(2024, 1, 10);
    let records = vec![
      record(1, day(2024, 1, 10), false, 15.0),
      record(2, day(2024, 1, 9), true, 20.0),
    ];

    let report = ProgressReport::compute(&records, &Goals::default(), today).unwrap();
    assert_eq!(report.total_workouts, 1);
    assert_eq!(report.total_calories_burned, 20.0);
  }

  #[test]
  fn test_achievement_thresholds_are_monotonic() {
    let achievements = unlocked_achievements(100, 0, 0.0, Utc::now());
    let names: Vec<_> = achievements.iter().map(|a| a.name.as_str()).collect();

    assert!(names.contains(&"First Steps"));
    assert!(names.contains(&"Getting Started"));
    assert!(names.contains(&"Consistent"));
    assert!(names.contains(&"Dedicated"));
  }

  #[test]
  fn test_streak_and_calorie_badges() {
    let achievements = unlocked_achievements(12, 7, 1500.0, Utc::now());
    let names: Vec<_> = achievements.iter().map(|a| a.name.as_str()).collect();

    assert!(names.contains(&"Week Warrior"));
    assert!(!names.contains(&"Month Master"));
    assert!(names.contains(&"Calorie Burner"));
    assert!(!names.contains(&"Calorie King"));
  }

  #[test]
  fn test_weekly_buckets_partition_records() {
    // 2024-01-10 is a Wednesday; the current week runs Sun Jan 7 - Sat Jan 13
    let today = day(2024, 1, 10);
    let records = vec![
      record(1, day(2024, 1, 7), true, 10.0),  // Sunday, current week
      record(2, day(2024, 1, 10), true, 10.0), // current week
      record(3, day(2024, 1, 6), true, 10.0),  // Saturday, previous week
      record(4, day(2023, 12, 20), true, 10.0), // three weeks back
    ];

    let report = ProgressReport::compute(&records, &Goals::default(), today).unwrap();
    let weeks = &report.weekly_progress;

    assert_eq!(weeks[0].week, "Week 4");
    assert_eq!(weeks[0].workouts_completed, 2);
    assert_eq!(weeks[0].calories_burned, 20.0);
    assert_eq!(weeks[1].workouts_completed, 1);
    assert_eq!(weeks[3].workouts_completed, 1);

    // Every record lands in exactly one bucket
    let total: i64 = weeks.iter().map(|w| w.workouts_completed).sum();
    assert_eq!(total, 4);
  }

  #[test]
  fn test_weekly_streak_days_dedupe_same_day() {
    let today = day(2024, 1, 10);
    let records = vec![
      record(1, Utc.with_ymd_and_hms(2024, 1, 10, 7, 0, 0).unwrap(), true, 10.0),
      record(2, Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap(), true, 10.0),
      record(3, day(2024, 1, 9), true, 10.0),
    ];

    let report = ProgressReport::compute(&records, &Goals::default(), today).unwrap();
    assert_eq!(report.weekly_progress[0].workouts_completed, 3);
    assert_eq!(report.weekly_progress[0].streak_days, 2);
  }

  #[test]
  fn test_monthly_buckets_span_year_boundary() {
    let today = day(2024, 1, 10);
    let records = vec![
      record(1, day(2024, 1, 5), true, 10.0),
      record(2, day(2023, 12, 31), true, 10.0),
      record(3, day(2023, 12, 1), true, 10.0),
      record(4, day(2023, 8, 15), true, 10.0), // oldest month in the horizon
    ];

    let report = ProgressReport::compute(&records, &Goals::default(), today).unwrap();
    let months = &report.monthly_progress;

    assert_eq!(months.len(), 6);
    assert_eq!(months[0].month, "Jan 2024");
    assert_eq!(months[0].workouts_completed, 1);
    assert_eq!(months[1].month, "Dec 2023");
    assert_eq!(months[1].workouts_completed, 2);
    assert_eq!(months[1].average_weekly, 0.5);
    assert_eq!(months[5].month, "Aug 2023");
    assert_eq!(months[5].workouts_completed, 1);
  }

  #[test]
  fn test_longest_streak_invariant_holds() {
    let today = day(2024, 1, 10);
    let records = vec![
      record(1, day(2024, 1, 10), true, 15.0),
      record(2, day(2024, 1, 9), true, 15.0),
      record(3, day(2024, 1, 8), true, 15.0),
    ];

    let mut goals = Goals::default();
    goals.longest_streak = 1; // stale persisted value below the fresh streak

    let report = ProgressReport::compute(&records, &goals, today).unwrap();
    assert_eq!(report.current_streak, 3);
    assert!(report.longest_streak >= report.current_streak);
  }

  #[test]
  fn test_invalid_record_is_rejected() {
    let today = day(2024, 1, 10);
    let mut bad = record(1, day(2024, 1, 10), true, 15.0);
    bad.sets = 0;

    assert!(ProgressReport::compute(&[bad], &Goals::default(), today).is_err());
  }

  #[test]
  fn test_report_serializes_to_json() {
    let today = day(2024, 1, 10);
    let report = ProgressReport::compute(&[], &Goals::default(), today).unwrap();
    let json = report.to_json();

    assert!(json.contains("total_workouts"));
    assert!(json.contains("weekly_progress"));
  }
}
