//! Community leaderboard ranking
//!
//! Ranks users by period-filtered completion counts: for the trailing
//! week/month windows the metric is completions inside the window, for
//! all-time it is the persisted lifetime total. Ties break on current
//! streak, then on user id so the ordering is a deterministic total order.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FitnessLevel, Goals, WorkoutRecord};

/// ---------------------------------------------------------------------------
/// Period Selector
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Period {
  #[default]
  All,
  Month,
  Week,
}

impl Period {
  /// Trailing window length in days; `None` means lifetime
  pub fn window_days(&self) -> Option<i64> {
    match self {
      Self::All => None,
      Self::Month => Some(30),
      Self::Week => Some(7),
    }
  }
}

impl std::fmt::Display for Period {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::All => write!(f, "all"),
      Self::Month => write!(f, "month"),
      Self::Week => write!(f, "week"),
    }
  }
}

impl std::str::FromStr for Period {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "all" => Ok(Self::All),
      "month" => Ok(Self::Month),
      "week" => Ok(Self::Week),
      _ => Err(format!("Unknown leaderboard period: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Inputs and Outputs
/// ---------------------------------------------------------------------------

/// One user's state as fetched from the record store
#[derive(Debug, Clone)]
pub struct UserSnapshot {
  pub user_id: i64,
  pub name: String,
  pub fitness_level: FitnessLevel,
  pub goals: Goals,
  pub records: Vec<WorkoutRecord>,
}

impl UserSnapshot {
  /// The primary ranking metric for a period
  fn metric(&self, period: Period, today: DateTime<Utc>) -> i64 {
    match period.window_days() {
      // Lifetime ranking reads the persisted total, matching what the
      // streak recomputation wrote last (eventually consistent)
      None => self.goals.total_workouts,
      Some(days) => {
        let cutoff = today - Duration::days(days);
        self
          .records
          .iter()
          .filter(|r| r.completed && r.date >= cutoff)
          .count() as i64
      }
    }
  }
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
  pub user_id: i64,
  pub name: String,
  pub fitness_level: FitnessLevel,
  pub workouts: i64,
  pub current_streak: i64,
}

/// A single user's position relative to the whole roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
  pub rank: i64,
  pub total_users: i64,
  pub percentile: i64,
  pub stats: RankStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankStats {
  pub total_workouts: i64,
  pub current_streak: i64,
  pub longest_streak: i64,
  pub total_calories: f64,
  pub period_workouts: i64,
}

/// ---------------------------------------------------------------------------
/// Ranking
/// ---------------------------------------------------------------------------

/// Order all users under the period's metric and return the top `limit`
pub fn compute_leaderboard(
  snapshots: &[UserSnapshot],
  period: Period,
  today: DateTime<Utc>,
  limit: usize,
) -> Vec<LeaderboardEntry> {
  let mut entries: Vec<LeaderboardEntry> = snapshots
    .iter()
    .map(|s| LeaderboardEntry {
      user_id: s.user_id,
      name: s.name.clone(),
      fitness_level: s.fitness_level,
      workouts: s.metric(period, today),
      current_streak: s.goals.current_streak,
    })
    .collect();

  entries.sort_by(|a, b| {
    b.workouts
      .cmp(&a.workouts)
      .then(b.current_streak.cmp(&a.current_streak))
      .then(a.user_id.cmp(&b.user_id))
  });
  entries.truncate(limit);

  entries
}

/// Rank one user against the roster.
///
/// Rank is 1 + the number of users strictly better under the same ordering;
/// percentile is `round((total - better) / total * 100)`. Returns `None` for
/// an empty roster or a user id not present in it, which also covers the
/// undefined zero-user percentile.
pub fn rank_user(
  snapshots: &[UserSnapshot],
  period: Period,
  today: DateTime<Utc>,
  user_id: i64,
) -> Option<RankReport> {
  let target = snapshots.iter().find(|s| s.user_id == user_id)?;

  let my_metric = target.metric(period, today);
  let my_streak = target.goals.current_streak;

  let total_users = snapshots.len() as i64;
  let better = snapshots
    .iter()
    .filter(|s| s.user_id != user_id)
    .filter(|s| {
      let metric = s.metric(period, today);
      metric > my_metric || (metric == my_metric && s.goals.current_streak > my_streak)
    })
    .count() as i64;

  let percentile =
    (((total_users - better) as f64 / total_users as f64) * 100.0).round() as i64;

  Some(RankReport {
    rank: better + 1,
    total_users,
    percentile,
    stats: RankStats {
      total_workouts: target.goals.total_workouts,
      current_streak: target.goals.current_streak,
      longest_streak: target.goals.longest_streak,
      total_calories: target.goals.total_calories_burned,
      period_workouts: match period.window_days() {
        Some(_) => my_metric,
        None => target.metric(Period::Week, today),
      },
    },
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
