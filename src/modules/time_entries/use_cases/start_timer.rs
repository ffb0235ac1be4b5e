// Purpose: start a running timer for a task.
// Responsibilities: verify the task exists and belongs to the caller, then
// insert a new running entry. The store enforces the one-running-timer rule.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::entry::TimeEntry;
use crate::modules::time_entries::core::ports::{TaskDirectory, TimerStore};
use crate::modules::time_entries::use_cases::errors::TimerError;

#[derive(Debug, Clone)]
pub struct StartTimer {
    pub task_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct StartedTimer {
    pub id: Uuid,
    pub task_id: Uuid,
    pub start_time: DateTime<Utc>,
}

pub struct StartTimerHandler {
    store: Arc<dyn TimerStore>,
    tasks: Arc<dyn TaskDirectory>,
}

impl StartTimerHandler {
    pub fn new(store: Arc<dyn TimerStore>, tasks: Arc<dyn TaskDirectory>) -> Self {
        Self { store, tasks }
    }

    pub async fn handle(&self, command: StartTimer) -> Result<StartedTimer, TimerError> {
        let task = self
            .tasks
            .get(command.task_id)
            .await?
            .ok_or(TimerError::TaskNotFound(command.task_id))?;

        if task.user_id != command.user_id {
            return Err(TimerError::Forbidden(command.task_id));
        }

        let entry = TimeEntry::started(command.task_id, Utc::now());
        let started = StartedTimer {
            id: entry.id,
            task_id: entry.task_id,
            start_time: entry.start_time,
        };
        self.store.insert_running(entry).await?;

        Ok(started)
    }
}
