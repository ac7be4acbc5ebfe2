use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::TrainingPlan;

const LAST_MODE: &str = "last.mode";
const LAST_PLAN_ID: &str = "last.plan_id";
const LAST_PLAN_DAY: &str = "last.plan_day";
const LAST_PLAN_NAME: &str = "last.plan_name";

/// The "last used" hint shown before a session starts. Informational
/// only; resume goes through the snapshot, never through these keys.
#[derive(Debug, Clone, PartialEq)]
pub struct LastUsed {
    pub mode: String,
    pub plan_id: Option<i64>,
    pub plan_day: Option<String>,
    pub plan_name: Option<String>,
}

#[derive(Clone)]
pub struct PreferenceRepository {
    pool: DbPool,
}

impl PreferenceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let pool = self.pool.clone();
        let key = key.to_string();
        let value = value.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                rusqlite::params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let pool = self.pool.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let value = conn
                .query_row("SELECT value FROM preferences WHERE key = ?", [&key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let pool = self.pool.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute("DELETE FROM preferences WHERE key = ?", [&key])?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Record that the last session was freeform; stale plan keys are
    /// dropped so the hint cannot mix modes.
    pub async fn record_empty_mode(&self) -> Result<()> {
        self.set(LAST_MODE, "empty").await?;
        self.remove(LAST_PLAN_ID).await?;
        self.remove(LAST_PLAN_DAY).await?;
        self.remove(LAST_PLAN_NAME).await
    }

    pub async fn record_plan_mode(&self, plan: &TrainingPlan, day: &str) -> Result<()> {
        self.set(LAST_MODE, "plan").await?;
        self.set(LAST_PLAN_ID, &plan.id.to_string()).await?;
        self.set(LAST_PLAN_DAY, day).await?;
        self.set(LAST_PLAN_NAME, &plan.name).await
    }

    pub async fn last_used(&self) -> Result<Option<LastUsed>> {
        let mode = match self.get(LAST_MODE).await? {
            Some(mode) => mode,
            None => return Ok(None),
        };
        let plan_id = self
            .get(LAST_PLAN_ID)
            .await?
            .and_then(|raw| raw.parse().ok());
        let plan_day = self.get(LAST_PLAN_DAY).await?;
        let plan_name = self.get(LAST_PLAN_NAME).await?;
        Ok(Some(LastUsed {
            mode,
            plan_id,
            plan_day,
            plan_name,
        }))
    }
}
