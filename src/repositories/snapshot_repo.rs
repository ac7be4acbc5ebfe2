use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::ActiveSession;

/// The one row the snapshot lives in. A single installation tracks at
/// most one in-progress session.
const SNAPSHOT_SLOT: i64 = 1;

#[derive(Clone)]
pub struct SnapshotRepository {
    pool: DbPool,
}

impl SnapshotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Persist the full session snapshot. Last write wins; there is no
    /// versioning and no delta encoding.
    pub async fn save(&self, session: &ActiveSession) -> Result<()> {
        let pool = self.pool.clone();
        let payload = serde_json::to_string(session)?;
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO active_session (slot, payload, updated_at) VALUES (?, ?, ?)
                 ON CONFLICT(slot) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
                rusqlite::params![SNAPSHOT_SLOT, payload, now],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Load the persisted snapshot. An absent slot and an unreadable
    /// payload both read as `None`; a stale or corrupt snapshot must
    /// never prevent starting fresh.
    pub async fn load(&self) -> Result<Option<ActiveSession>> {
        let pool = self.pool.clone();

        let payload = tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let payload: Option<String> = conn
                .query_row(
                    "SELECT payload FROM active_session WHERE slot = ?",
                    [SNAPSHOT_SLOT],
                    |row| row.get(0),
                )
                .optional()?;
            Ok::<_, AppError>(payload)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        match payload {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(session) => Ok(Some(session)),
                Err(err) => {
                    tracing::warn!("Discarding unreadable session snapshot: {}", err);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Drop the snapshot. Called when a session finishes or is abandoned.
    pub async fn clear(&self) -> Result<()> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "DELETE FROM active_session WHERE slot = ?",
                [SNAPSHOT_SLOT],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
