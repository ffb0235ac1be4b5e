// Purpose: read a user's entries with task metadata attached.
// Responsibilities: resolve the date filter (a single date beats a range),
// join entries against the task directory, and expose the currently running
// entry for today.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::entry::TimeEntry;
use crate::modules::time_entries::core::ports::{DateWindow, TaskDirectory, TaskRef, TimerStore};
use crate::modules::time_entries::use_cases::errors::TimerError;

#[derive(Debug, Clone, Copy)]
pub struct ListEntries {
    pub user_id: Uuid,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct EntryWithTask {
    pub entry: TimeEntry,
    pub task: TaskRef,
}

pub struct ListEntriesHandler {
    store: Arc<dyn TimerStore>,
    tasks: Arc<dyn TaskDirectory>,
}

impl ListEntriesHandler {
    pub fn new(store: Arc<dyn TimerStore>, tasks: Arc<dyn TaskDirectory>) -> Self {
        Self { store, tasks }
    }

    fn window_of(query: &ListEntries) -> Option<DateWindow> {
        if let Some(date) = query.date {
            return Some(DateWindow::Day(date));
        }
        match (query.start_date, query.end_date) {
            (Some(start), Some(end)) => Some(DateWindow::Range { start, end }),
            _ => None,
        }
    }

    async fn fetch(
        &self,
        user_id: Uuid,
        window: Option<DateWindow>,
    ) -> Result<Vec<EntryWithTask>, TimerError> {
        let owned = self.tasks.owned_by(user_id).await?;
        let ids: Vec<Uuid> = owned.iter().map(|task| task.id).collect();
        let by_id: HashMap<Uuid, TaskRef> =
            owned.into_iter().map(|task| (task.id, task)).collect();

        let entries = self.store.entries_for_tasks(&ids, window).await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let task = by_id.get(&entry.task_id)?.clone();
                Some(EntryWithTask { entry, task })
            })
            .collect())
    }

    pub async fn handle(&self, query: ListEntries) -> Result<Vec<EntryWithTask>, TimerError> {
        let window = Self::window_of(&query);
        self.fetch(query.user_id, window).await
    }

    /// Today's entries still running, one per task at most.
    pub async fn running_today(&self, user_id: Uuid) -> Result<Vec<EntryWithTask>, TimerError> {
        let today = Utc::now().date_naive();
        let mut rows = self.fetch(user_id, Some(DateWindow::Day(today))).await?;
        rows.retain(|row| row.entry.is_running());
        Ok(rows)
    }
}
