use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::{PlanSet, TrainingPlan};
use super::set::{SetUpdate, WorkoutSet};

/// An in-progress workout. The mode is fixed at creation: a freeform
/// session tracks its rows directly, a plan session derives them from the
/// selected plan day plus the parallel completion flags.
///
/// This is also the persisted snapshot: the whole value is serialized to
/// the single storage slot after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ActiveSession {
    Empty {
        timer_secs: u64,
        session_start: DateTime<Utc>,
        sets: Vec<WorkoutSet>,
    },
    Plan {
        timer_secs: u64,
        session_start: DateTime<Utc>,
        plan: TrainingPlan,
        day: String,
        exercise_index: usize,
        done_by_exercise: Vec<Vec<bool>>,
        /// Rows shown when the resolved day has no exercises; there is no
        /// plan slot to hold them.
        fallback_sets: Vec<WorkoutSet>,
    },
}

impl ActiveSession {
    pub fn start_empty(now: DateTime<Utc>) -> Self {
        ActiveSession::Empty {
            timer_secs: 0,
            session_start: now,
            sets: vec![WorkoutSet::synthetic()],
        }
    }

    pub fn start_plan(plan: TrainingPlan, day: String, now: DateTime<Utc>) -> Self {
        let exercises = plan.day_exercises(&day);
        let done_by_exercise: Vec<Vec<bool>> = exercises
            .iter()
            .map(|exercise| vec![false; exercise.sets.len()])
            .collect();
        let fallback_sets = if exercises.is_empty() {
            vec![WorkoutSet::synthetic()]
        } else {
            Vec::new()
        };
        ActiveSession::Plan {
            timer_secs: 0,
            session_start: now,
            plan,
            day,
            exercise_index: 0,
            done_by_exercise,
            fallback_sets,
        }
    }

    pub fn is_plan(&self) -> bool {
        matches!(self, ActiveSession::Plan { .. })
    }

    pub fn mode_label(&self) -> &'static str {
        match self {
            ActiveSession::Empty { .. } => "empty",
            ActiveSession::Plan { .. } => "plan",
        }
    }

    pub fn timer_secs(&self) -> u64 {
        match self {
            ActiveSession::Empty { timer_secs, .. } => *timer_secs,
            ActiveSession::Plan { timer_secs, .. } => *timer_secs,
        }
    }

    pub fn session_start(&self) -> DateTime<Utc> {
        match self {
            ActiveSession::Empty { session_start, .. } => *session_start,
            ActiveSession::Plan { session_start, .. } => *session_start,
        }
    }

    pub fn tick(&mut self) {
        match self {
            ActiveSession::Empty { timer_secs, .. } => *timer_secs += 1,
            ActiveSession::Plan { timer_secs, .. } => *timer_secs += 1,
        }
    }

    pub fn plan(&self) -> Option<&TrainingPlan> {
        match self {
            ActiveSession::Plan { plan, .. } => Some(plan),
            ActiveSession::Empty { .. } => None,
        }
    }

    pub fn day(&self) -> Option<&str> {
        match self {
            ActiveSession::Plan { day, .. } => Some(day),
            ActiveSession::Empty { .. } => None,
        }
    }

    pub fn exercise_index(&self) -> usize {
        match self {
            ActiveSession::Plan { exercise_index, .. } => *exercise_index,
            ActiveSession::Empty { .. } => 0,
        }
    }

    pub fn total_exercises(&self) -> usize {
        match self {
            ActiveSession::Plan { plan, day, .. } => plan.day_exercises(day).len(),
            ActiveSession::Empty { .. } => 0,
        }
    }

    pub fn current_exercise_name(&self) -> Option<&str> {
        match self {
            ActiveSession::Plan {
                plan,
                day,
                exercise_index,
                ..
            } => plan
                .day_exercises(day)
                .get(*exercise_index)
                .map(|exercise| exercise.name.as_str()),
            ActiveSession::Empty { .. } => None,
        }
    }

    /// The rows currently displayed. For plan sessions these are derived
    /// from the current exercise's plan sets and completion flags, so the
    /// two can never diverge.
    pub fn sets(&self) -> Vec<WorkoutSet> {
        match self {
            ActiveSession::Empty { sets, .. } => sets.clone(),
            ActiveSession::Plan {
                plan,
                day,
                exercise_index,
                done_by_exercise,
                fallback_sets,
                ..
            } => {
                let exercises = plan.day_exercises(day);
                if exercises.is_empty() {
                    return fallback_sets.clone();
                }
                let index = (*exercise_index).min(exercises.len() - 1);
                let flags = done_by_exercise
                    .get(index)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                exercises[index]
                    .sets
                    .iter()
                    .enumerate()
                    .map(|(idx, plan_set)| {
                        WorkoutSet::at_position(
                            idx,
                            plan_set.weight_value(),
                            plan_set.reps_value(),
                            flags.get(idx).copied().unwrap_or(false),
                        )
                    })
                    .collect()
            }
        }
    }

    /// Flip the completion flag of the row at `index`. Out-of-range
    /// indices are ignored.
    pub fn toggle_set(&mut self, index: usize) {
        match self {
            ActiveSession::Empty { sets, .. } => {
                if let Some(set) = sets.get_mut(index) {
                    set.done = !set.done;
                }
            }
            ActiveSession::Plan {
                plan,
                day,
                exercise_index,
                done_by_exercise,
                fallback_sets,
                ..
            } => {
                if plan.day_exercises(day).is_empty() {
                    if let Some(set) = fallback_sets.get_mut(index) {
                        set.done = !set.done;
                    }
                    return;
                }
                if let Some(flag) = done_by_exercise
                    .get_mut(*exercise_index)
                    .and_then(|flags| flags.get_mut(index))
                {
                    *flag = !*flag;
                }
            }
        }
    }

    /// Apply a numeric edit to the row at `index`. Plan sessions write the
    /// value back into the plan itself so edits survive navigating to
    /// another exercise and back.
    pub fn update_set(&mut self, index: usize, update: SetUpdate) {
        match self {
            ActiveSession::Empty { sets, .. } => {
                if let Some(set) = sets.get_mut(index) {
                    apply_update(set, update);
                }
            }
            ActiveSession::Plan {
                plan,
                day,
                exercise_index,
                fallback_sets,
                ..
            } => {
                if plan.day_exercises(day).is_empty() {
                    if let Some(set) = fallback_sets.get_mut(index) {
                        apply_update(set, update);
                    }
                    return;
                }
                if let Some(plan_set) = plan
                    .exercises_by_day
                    .get_mut(day.as_str())
                    .and_then(|exercises| exercises.get_mut(*exercise_index))
                    .and_then(|exercise| exercise.sets.get_mut(index))
                {
                    match update {
                        SetUpdate::Weight(weight) => plan_set.weight = weight.to_string(),
                        SetUpdate::Reps(reps) => plan_set.reps = reps.to_string(),
                    }
                }
            }
        }
    }

    /// Append a row seeded from the previous row's values (0/0 if none).
    pub fn add_set(&mut self) {
        let (next_weight, next_reps) = self
            .sets()
            .last()
            .map(|set| (set.weight, set.reps))
            .unwrap_or((0.0, 0));
        match self {
            ActiveSession::Empty { sets, .. } => {
                let position = sets.len();
                sets.push(WorkoutSet::at_position(position, next_weight, next_reps, false));
            }
            ActiveSession::Plan {
                plan,
                day,
                exercise_index,
                done_by_exercise,
                fallback_sets,
                ..
            } => {
                if plan.day_exercises(day).is_empty() {
                    let position = fallback_sets.len();
                    fallback_sets.push(WorkoutSet::at_position(
                        position,
                        next_weight,
                        next_reps,
                        false,
                    ));
                    return;
                }
                if let Some(exercise) = plan
                    .exercises_by_day
                    .get_mut(day.as_str())
                    .and_then(|exercises| exercises.get_mut(*exercise_index))
                {
                    let set_type = exercise
                        .sets
                        .last()
                        .map(|set| set.set_type)
                        .unwrap_or_default();
                    exercise.sets.push(PlanSet {
                        set_type,
                        weight: next_weight.to_string(),
                        reps: next_reps.to_string(),
                    });
                }
                if let Some(flags) = done_by_exercise.get_mut(*exercise_index) {
                    flags.push(false);
                }
            }
        }
    }

    /// Move to another exercise of the plan day, clamped into range.
    /// A no-op for freeform sessions and for days with no exercises.
    pub fn go_to_exercise(&mut self, next_index: i64) {
        if let ActiveSession::Plan {
            plan,
            day,
            exercise_index,
            ..
        } = self
        {
            let total = plan.day_exercises(day).len();
            if total == 0 {
                return;
            }
            *exercise_index = next_index.clamp(0, total as i64 - 1) as usize;
        }
    }

    /// Plan sessions require every set of every exercise of the day to be
    /// done (a day with no exercises never completes); freeform sessions
    /// require every displayed row to be done.
    pub fn all_sets_done(&self) -> bool {
        match self {
            ActiveSession::Empty { sets, .. } => sets.is_empty() || sets.iter().all(|set| set.done),
            ActiveSession::Plan {
                done_by_exercise, ..
            } => {
                !done_by_exercise.is_empty()
                    && done_by_exercise
                        .iter()
                        .all(|flags| flags.iter().all(|done| *done))
            }
        }
    }

    /// (done, total) set counts across the whole session, as shown by the
    /// progress indicator.
    pub fn set_counts(&self) -> (usize, usize) {
        match self {
            ActiveSession::Empty { sets, .. } => {
                (sets.iter().filter(|set| set.done).count(), sets.len())
            }
            ActiveSession::Plan {
                plan,
                day,
                done_by_exercise,
                ..
            } => {
                let total = plan
                    .day_exercises(day)
                    .iter()
                    .map(|exercise| exercise.sets.len())
                    .sum();
                let done = done_by_exercise
                    .iter()
                    .map(|flags| flags.iter().filter(|done| **done).count())
                    .sum();
                (done, total)
            }
        }
    }

    pub fn title(&self) -> String {
        match self {
            ActiveSession::Empty { .. } => "Empty Workout".to_string(),
            ActiveSession::Plan { plan, .. } => {
                if plan.name.is_empty() {
                    "Workout".to_string()
                } else {
                    plan.name.clone()
                }
            }
        }
    }

    pub fn set_type_label(&self, index: usize) -> &'static str {
        match self {
            ActiveSession::Empty { .. } => "custom",
            ActiveSession::Plan {
                plan,
                day,
                exercise_index,
                ..
            } => plan
                .day_exercises(day)
                .get(*exercise_index)
                .and_then(|exercise| exercise.sets.get(index))
                .map(|set| set.set_type.label())
                .unwrap_or("normal"),
        }
    }
}

fn apply_update(set: &mut WorkoutSet, update: SetUpdate) {
    match update {
        SetUpdate::Weight(weight) => set.weight = weight,
        SetUpdate::Reps(reps) => set.reps = reps,
    }
}
