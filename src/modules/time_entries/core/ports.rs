// Ports define what the timer core needs from the outside world, without
// implementing it.
//
// Responsibilities
// - Keep the core independent of any database or transport by coding against
//   traits.
// - Pin down the atomicity the storage layer must provide: the start guard and
//   the stop guard are single store operations, never handler-side
//   read-then-write sequences.
//
// Testing guidance
// - In-memory implementations live under `adapters` and back the tests and
//   local development.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::entry::{EntryPatch, TimeEntry, TimerSync};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task {task_id} already has a running timer")]
    RunningTimerExists { task_id: Uuid },

    #[error("time entry {0} not found")]
    EntryNotFound(Uuid),

    #[error("time entry {0} is already stopped")]
    AlreadyStopped(Uuid),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Date filter applied to `start_time`, in UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    Day(NaiveDate),
    /// Inclusive on both ends.
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let date = at.date_naive();
        match self {
            DateWindow::Day(day) => date == *day,
            DateWindow::Range { start, end } => date >= *start && date <= *end,
        }
    }
}

#[async_trait]
pub trait TimerStore: Send + Sync {
    /// Insert a new running entry. Atomic check-then-insert: fails with
    /// `RunningTimerExists` if the task already has an entry with no end time.
    async fn insert_running(&self, entry: TimeEntry) -> Result<(), StoreError>;

    /// Set the end time of a running entry, guarded on "end time is null".
    /// The stored end time never precedes the start time.
    async fn finalize(&self, id: Uuid, end_time: DateTime<Utc>)
    -> Result<TimeEntry, StoreError>;

    /// Apply a partial update. Clearing the end time re-checks the
    /// single-running-timer guard for the entry's task.
    async fn apply_patch(&self, id: Uuid, patch: EntryPatch) -> Result<TimeEntry, StoreError>;

    /// Remove an entry unconditionally, running or not.
    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;

    /// Entries for the given tasks, ordered by start time ascending.
    async fn entries_for_tasks(
        &self,
        task_ids: &[Uuid],
        window: Option<DateWindow>,
    ) -> Result<Vec<TimeEntry>, StoreError>;

    /// Completed entries (end time set) for the given tasks whose start date
    /// falls in `[from, to)`, ordered by start time ascending.
    async fn completed_in_window(
        &self,
        task_ids: &[Uuid],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, StoreError>;

    /// All running entries across all tasks. The broadcaster's hot query.
    async fn running(&self) -> Result<Vec<TimeEntry>, StoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRef {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

/// Snapshot of a task as seen by the task/project read model. Ownership and
/// project grouping are consumed here, never duplicated in the timer store.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRef {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub color: String,
    pub status: String,
    pub project: Option<ProjectRef>,
}

#[async_trait]
pub trait TaskDirectory: Send + Sync {
    async fn get(&self, task_id: Uuid) -> Result<Option<TaskRef>, StoreError>;

    async fn owned_by(&self, user_id: Uuid) -> Result<Vec<TaskRef>, StoreError>;
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel backend error: {0}")]
    Backend(String),
}

/// Group-addressed push transport. Delivery is best-effort and at-most-once;
/// the store stays authoritative, so a dropped batch is self-correcting.
#[async_trait]
pub trait SyncChannel: Send + Sync {
    async fn publish(&self, user_id: Uuid, batch: &[TimerSync]) -> Result<(), ChannelError>;
}

#[cfg(test)]
mod date_window_tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn it_should_match_a_single_day_window() {
        let window = DateWindow::Day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()));
    }

    #[test]
    fn it_should_treat_a_range_window_as_inclusive() {
        let window = DateWindow::Range {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        };
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()));
    }
}
