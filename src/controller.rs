//! Session state machine
//!
//! Owns the in-progress workout and every legal transition over it:
//! `NotStarted -> Active -> {Finished, Abandoned}`, with suspend/resume
//! through the persisted snapshot. Every mutation while Active re-saves
//! the full snapshot, so the resume point is always the last completed
//! operation.

use chrono::{Datelike, Local, Utc};

use crate::clients::{HistoryClient, PlanClient};
use crate::error::{AppError, Result};
use crate::models::{
    resolve_default_day, weekday_code, ActiveSession, SetUpdate, WorkoutHistoryCreate,
    WorkoutHistoryItem,
};
use crate::repositories::{PreferenceRepository, SnapshotRepository};

#[derive(Debug)]
pub enum SessionState {
    NotStarted,
    Active(ActiveSession),
    Finished,
    Abandoned,
}

/// Outcome of `finish`. An incomplete session is not an error; the caller
/// must confirm and call again with `force`.
#[derive(Debug)]
pub enum FinishOutcome {
    ConfirmationRequired,
    Completed(WorkoutHistoryItem),
}

pub struct SessionController {
    snapshots: SnapshotRepository,
    preferences: PreferenceRepository,
    plans: PlanClient,
    history: HistoryClient,
    state: SessionState,
}

impl SessionController {
    pub fn new(
        snapshots: SnapshotRepository,
        preferences: PreferenceRepository,
        plans: PlanClient,
        history: HistoryClient,
    ) -> Self {
        Self {
            snapshots,
            preferences,
            plans,
            history,
            state: SessionState::NotStarted,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        match &self.state {
            SessionState::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// Restore a suspended session from the snapshot store. Returns
    /// whether one was found; no snapshot (or a corrupt one) just means
    /// starting fresh.
    pub async fn resume(&mut self) -> Result<bool> {
        if self.is_active() {
            return Err(AppError::SessionInProgress);
        }
        match self.snapshots.load().await? {
            Some(session) => {
                tracing::info!(
                    mode = session.mode_label(),
                    elapsed_secs = session.timer_secs(),
                    "Resuming suspended workout session"
                );
                self.state = SessionState::Active(session);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Peek at the persisted snapshot without changing state.
    pub async fn suspended_session(&self) -> Result<Option<ActiveSession>> {
        self.snapshots.load().await
    }

    pub async fn start_empty(&mut self) -> Result<()> {
        if self.is_active() {
            return Err(AppError::SessionInProgress);
        }
        let session = ActiveSession::start_empty(Utc::now());
        self.preferences.record_empty_mode().await?;
        self.snapshots.save(&session).await?;
        self.state = SessionState::Active(session);
        tracing::debug!("Started empty workout session");
        Ok(())
    }

    /// Start a session from a saved plan. The day is the explicit
    /// override when the plan actually runs on it, otherwise today if
    /// configured, otherwise the plan's first configured day.
    pub async fn start_from_plan(&mut self, plan_id: i64, day_override: Option<&str>) -> Result<()> {
        if self.is_active() {
            return Err(AppError::SessionInProgress);
        }
        let plan = self.plans.get_plan(plan_id).await?;
        let today = weekday_code(Local::now().weekday());
        let day = match day_override {
            Some(day) if plan.runs_on(day) => day.to_string(),
            _ => resolve_default_day(&plan, today),
        };
        self.preferences.record_plan_mode(&plan, &day).await?;
        let session = ActiveSession::start_plan(plan, day, Utc::now());
        self.snapshots.save(&session).await?;
        tracing::debug!(plan_id, day = %session.day().unwrap_or(""), "Started plan workout session");
        self.state = SessionState::Active(session);
        Ok(())
    }

    /// Advance the timer by one second. A no-op unless a session is
    /// active.
    pub async fn tick(&mut self) -> Result<()> {
        match &mut self.state {
            SessionState::Active(session) => session.tick(),
            _ => return Ok(()),
        }
        self.persist().await
    }

    pub async fn toggle_set(&mut self, index: usize) -> Result<()> {
        self.session_mut()?.toggle_set(index);
        self.persist().await
    }

    pub async fn update_set(&mut self, index: usize, update: SetUpdate) -> Result<()> {
        self.session_mut()?.update_set(index, update);
        self.persist().await
    }

    pub async fn add_set(&mut self) -> Result<()> {
        self.session_mut()?.add_set();
        self.persist().await
    }

    pub async fn go_to_exercise(&mut self, next_index: i64) -> Result<()> {
        self.session_mut()?.go_to_exercise(next_index);
        self.persist().await
    }

    /// Finish the session: submit the history record, clear the snapshot
    /// and transition to `Finished`. With sets still undone and `force`
    /// unset this requests confirmation instead. A failed submission
    /// leaves the session active and the snapshot in place so the caller
    /// can retry.
    pub async fn finish(&mut self, force: bool) -> Result<FinishOutcome> {
        let session = match &self.state {
            SessionState::Active(session) => session,
            _ => return Err(AppError::NoActiveSession),
        };
        if !session.all_sets_done() && !force {
            return Ok(FinishOutcome::ConfirmationRequired);
        }
        let record = WorkoutHistoryCreate::from_session(session, Utc::now());
        let created = self.history.submit(&record).await?;
        self.snapshots.clear().await?;
        self.state = SessionState::Finished;
        tracing::info!(
            volume_kg = record.volume_kg,
            sets = record.sets,
            duration_minutes = record.duration_minutes,
            "Workout session finished"
        );
        Ok(FinishOutcome::Completed(created))
    }

    /// Discard the session and its snapshot. Nothing is submitted. The
    /// caller is expected to have asked the user first.
    pub async fn abandon(&mut self) -> Result<()> {
        self.snapshots.clear().await?;
        self.state = SessionState::Abandoned;
        tracing::debug!("Workout session abandoned");
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut ActiveSession> {
        match &mut self.state {
            SessionState::Active(session) => Ok(session),
            _ => Err(AppError::NoActiveSession),
        }
    }

    async fn persist(&self) -> Result<()> {
        if let SessionState::Active(session) = &self.state {
            self.snapshots.save(session).await?;
        }
        Ok(())
    }
}
