// In-memory implementation of the TimerStore port.
//
// Purpose
// - Back the tests and local development without a database.
//
// Responsibilities
// - Hold every guard inside a single write-lock critical section so the start
//   and stop guards behave like the partial-unique-index / guarded-update
//   statements a relational backend would use.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::time_entries::core::entry::{EntryPatch, TimeEntry};
use crate::modules::time_entries::core::ports::{DateWindow, StoreError, TimerStore};

pub struct InMemoryTimerStore {
    inner: RwLock<HashMap<Uuid, TimeEntry>>,
    offline: bool,
}

impl InMemoryTimerStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            offline: false,
        }
    }

    /// Make every operation fail, simulating an unreachable backend.
    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Backend("timer store offline".into()));
        }
        Ok(())
    }

    fn sorted_by_start(mut entries: Vec<TimeEntry>) -> Vec<TimeEntry> {
        entries.sort_by_key(|e| e.start_time);
        entries
    }
}

impl Default for InMemoryTimerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimerStore for InMemoryTimerStore {
    async fn insert_running(&self, entry: TimeEntry) -> Result<(), StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        let already_running = guard
            .values()
            .any(|e| e.task_id == entry.task_id && e.is_running());
        if already_running {
            return Err(StoreError::RunningTimerExists {
                task_id: entry.task_id,
            });
        }
        guard.insert(entry.id, entry);
        Ok(())
    }

    async fn finalize(
        &self,
        id: Uuid,
        end_time: DateTime<Utc>,
    ) -> Result<TimeEntry, StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        let entry = guard.get_mut(&id).ok_or(StoreError::EntryNotFound(id))?;
        if !entry.is_running() {
            return Err(StoreError::AlreadyStopped(id));
        }
        // End never precedes start, even after a manual start-time correction.
        entry.end_time = Some(end_time.max(entry.start_time));
        Ok(entry.clone())
    }

    async fn apply_patch(&self, id: Uuid, patch: EntryPatch) -> Result<TimeEntry, StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        let task_id = guard
            .get(&id)
            .map(|e| e.task_id)
            .ok_or(StoreError::EntryNotFound(id))?;
        if patch.end_time == Some(None) {
            // Clearing the end time re-introduces a running entry, so the
            // single-running-timer guard applies here too.
            let other_running = guard
                .values()
                .any(|e| e.id != id && e.task_id == task_id && e.is_running());
            if other_running {
                return Err(StoreError::RunningTimerExists { task_id });
            }
        }
        let entry = guard.get_mut(&id).ok_or(StoreError::EntryNotFound(id))?;
        if let Some(start_time) = patch.start_time {
            entry.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            entry.end_time = end_time;
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }
        Ok(entry.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        guard
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::EntryNotFound(id))
    }

    async fn entries_for_tasks(
        &self,
        task_ids: &[Uuid],
        window: Option<DateWindow>,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        let entries = guard
            .values()
            .filter(|e| task_ids.contains(&e.task_id))
            .filter(|e| window.is_none_or(|w| w.contains(e.start_time)))
            .cloned()
            .collect();
        Ok(Self::sorted_by_start(entries))
    }

    async fn completed_in_window(
        &self,
        task_ids: &[Uuid],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        let entries = guard
            .values()
            .filter(|e| task_ids.contains(&e.task_id) && !e.is_running())
            .filter(|e| {
                let date = e.start_time.date_naive();
                date >= from && date < to
            })
            .cloned()
            .collect();
        Ok(Self::sorted_by_start(entries))
    }

    async fn running(&self) -> Result<Vec<TimeEntry>, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        Ok(guard.values().filter(|e| e.is_running()).cloned().collect())
    }
}
