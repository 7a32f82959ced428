use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Fitness Level
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FitnessLevel {
  #[default]
  Beginner,
  Intermediate,
  Master,
}

impl std::fmt::Display for FitnessLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Beginner => write!(f, "Beginner"),
      Self::Intermediate => write!(f, "Intermediate"),
      Self::Master => write!(f, "Master"),
    }
  }
}

impl std::str::FromStr for FitnessLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Beginner" => Ok(Self::Beginner),
      "Intermediate" => Ok(Self::Intermediate),
      "Master" => Ok(Self::Master),
      _ => Err(format!("Unknown fitness level: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// User Profile
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
  pub id: i64,
  pub name: String,
  pub email: String,
  pub fitness_level: FitnessLevel,
  pub created_at: Option<DateTime<Utc>>,
}
