//! fitstreak: workout streaks, progress analytics, and community rankings
//! backed by a local SQLite record store.
//!
//! The crate splits into a pure analytics core (`streak`, `analytics`,
//! `leaderboard`) that computes over in-memory record slices with an
//! injected "today", and a thin service layer (`service`) that reads and
//! writes those records through the pool in `db`.

pub mod analytics;
pub mod db;
pub mod leaderboard;
pub mod models;
pub mod service;
pub mod streak;

#[cfg(test)]
pub mod test_utils;

pub use analytics::{MonthlyBucket, ProgressReport, RecentWorkout, WeeklyBucket};
pub use db::{initialize_db, AppState, DbConfig, DbPool};
pub use leaderboard::{
  compute_leaderboard, rank_user, LeaderboardEntry, Period, RankReport, RankStats, UserSnapshot,
};
pub use models::{
  Achievement, FitnessLevel, Goals, NewWorkoutRecord, RecordError, UserProfile, WorkoutRecord,
  DEFAULT_CALORIES_PER_SET,
};
pub use service::{FeedItem, ServiceError, ServiceResult};
pub use streak::{compute_streak, StreakSummary};

/// Install the global tracing subscriber, filtered by `RUST_LOG`.
/// Call once at process startup before touching the database.
pub fn init_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();
}
