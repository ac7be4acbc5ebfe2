pub mod history;
pub mod plan;
pub mod session;
pub mod set;

pub use history::{history_sets, WorkoutHistoryCreate, WorkoutHistoryItem, WorkoutSetRecord};
pub use plan::{resolve_default_day, weekday_code, PlanExercise, PlanSet, SetType, TrainingPlan};
pub use session::ActiveSession;
pub use set::{prev_label, SetUpdate, WorkoutSet};
