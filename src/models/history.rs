use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::SetType;
use super::session::ActiveSession;

/// One submitted set of a finished workout, as the history service
/// expects it. Zero weight or reps travel as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSetRecord {
    pub exercise_title: String,
    pub superset_id: Option<i64>,
    pub exercise_notes: Option<String>,
    pub set_index: u32,
    pub set_type: SetType,
    pub weight_kg: Option<f64>,
    pub reps: Option<u32>,
}

/// Body of `POST /history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutHistoryCreate {
    pub title: String,
    pub workout_date: String,
    pub duration_minutes: i64,
    pub volume_kg: f64,
    pub sets: usize,
    pub workout_sets: Vec<WorkoutSetRecord>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// History record as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutHistoryItem {
    pub id: i64,
    pub title: String,
    pub workout_date: String,
    pub duration_minutes: i64,
    pub volume_kg: f64,
    pub sets: usize,
    #[serde(default)]
    pub workout_sets: Vec<WorkoutSetRecord>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: String,
}

impl WorkoutHistoryCreate {
    pub fn from_session(session: &ActiveSession, end_time: DateTime<Utc>) -> Self {
        let workout_sets = history_sets(session);
        let volume_kg = workout_sets
            .iter()
            .map(|set| match (set.weight_kg, set.reps) {
                (Some(weight), Some(reps)) => weight * reps as f64,
                _ => 0.0,
            })
            .sum();
        Self {
            title: session.title(),
            workout_date: session.session_start().format("%Y-%m-%d").to_string(),
            duration_minutes: (session.timer_secs() as f64 / 60.0).round() as i64,
            volume_kg,
            sets: workout_sets.len(),
            workout_sets,
            start_time: session.session_start(),
            end_time,
        }
    }
}

/// Flatten only the completed sets into submission order. Completed sets
/// are re-numbered from 1 within each exercise, so skipped sets leave no
/// gap in `set_index`.
pub fn history_sets(session: &ActiveSession) -> Vec<WorkoutSetRecord> {
    match session {
        ActiveSession::Plan {
            plan,
            day,
            done_by_exercise,
            ..
        } => plan
            .day_exercises(day)
            .iter()
            .enumerate()
            .flat_map(|(exercise_idx, exercise)| {
                let flags = done_by_exercise
                    .get(exercise_idx)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                exercise
                    .sets
                    .iter()
                    .enumerate()
                    .filter(|(set_idx, _)| flags.get(*set_idx).copied().unwrap_or(false))
                    .enumerate()
                    .map(|(new_idx, (_, set))| WorkoutSetRecord {
                        exercise_title: exercise.name.clone(),
                        superset_id: None,
                        exercise_notes: None,
                        set_index: new_idx as u32 + 1,
                        set_type: set.set_type,
                        weight_kg: weight_or_none(set.weight_value()),
                        reps: reps_or_none(set.reps_value()),
                    })
                    .collect::<Vec<_>>()
            })
            .collect(),
        ActiveSession::Empty { sets, .. } => sets
            .iter()
            .filter(|set| set.done)
            .enumerate()
            .map(|(new_idx, set)| WorkoutSetRecord {
                exercise_title: "Custom Exercise".to_string(),
                superset_id: None,
                exercise_notes: None,
                set_index: new_idx as u32 + 1,
                set_type: SetType::Normal,
                weight_kg: weight_or_none(set.weight),
                reps: reps_or_none(set.reps),
            })
            .collect(),
    }
}

fn weight_or_none(value: f64) -> Option<f64> {
    if value != 0.0 && value.is_finite() {
        Some(value)
    } else {
        None
    }
}

fn reps_or_none(value: u32) -> Option<u32> {
    if value != 0 {
        Some(value)
    } else {
        None
    }
}
