// The central entity of the timer subsystem. An entry with no end time is a
// running timer; setting the end time is the only state transition apart from
// explicit manual correction.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub id: Uuid,
    pub task_id: Uuid,
    pub start_time: DateTime<Utc>,
    /// `None` means running.
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimeEntry {
    /// A fresh running entry for `task_id`, started at `now`.
    pub fn started(task_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            task_id,
            start_time: now,
            end_time: None,
            notes: None,
            created_at: now,
        }
    }

    pub fn is_running(&self) -> bool {
        self.end_time.is_none()
    }

    /// Elapsed time: end minus start if stopped, otherwise `now` minus start.
    /// Derived, never persisted.
    pub fn duration(&self, now: DateTime<Utc>) -> TimeDelta {
        self.end_time.unwrap_or(now) - self.start_time
    }
}

/// Partial update applied by the Update operation. `end_time` is doubly
/// optional so "clear back to running" stays distinct from "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<Option<DateTime<Utc>>>,
    pub notes: Option<String>,
}

/// One running entry's share of a broadcast batch. Transient: carries no
/// persisted state, elapsed is computed at broadcast time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSync {
    pub id: Uuid,
    pub task_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub elapsed_seconds: i64,
}
