pub mod goals;
pub mod user;
pub mod workout;

pub use goals::{Achievement, Goals};
pub use user::{FitnessLevel, UserProfile};
pub use workout::{NewWorkoutRecord, RecordError, WorkoutRecord, DEFAULT_CALORIES_PER_SET};
