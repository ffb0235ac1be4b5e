// Purpose: stop a running timer and report the completed duration.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::ports::TimerStore;
use crate::modules::time_entries::use_cases::errors::TimerError;

#[derive(Debug, Clone, Copy)]
pub struct StopTimer {
    pub entry_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct StoppedTimer {
    pub id: Uuid,
    pub end_time: DateTime<Utc>,
    pub duration: TimeDelta,
}

pub struct StopTimerHandler {
    store: Arc<dyn TimerStore>,
}

impl StopTimerHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: StopTimer) -> Result<StoppedTimer, TimerError> {
        let now = Utc::now();
        let entry = self.store.finalize(command.entry_id, now).await?;
        let end_time = entry.end_time.unwrap_or(now);

        Ok(StoppedTimer {
            id: entry.id,
            end_time,
            duration: end_time - entry.start_time,
        })
    }
}
