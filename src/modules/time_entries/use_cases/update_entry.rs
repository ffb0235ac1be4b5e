// Purpose: apply a partial edit to an existing entry.

use std::sync::Arc;

use uuid::Uuid;

use crate::modules::time_entries::core::entry::{EntryPatch, TimeEntry};
use crate::modules::time_entries::core::ports::TimerStore;
use crate::modules::time_entries::use_cases::errors::TimerError;

#[derive(Debug, Clone)]
pub struct UpdateEntry {
    pub entry_id: Uuid,
    pub patch: EntryPatch,
}

pub struct UpdateEntryHandler {
    store: Arc<dyn TimerStore>,
}

impl UpdateEntryHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: UpdateEntry) -> Result<TimeEntry, TimerError> {
        let entry = self
            .store
            .apply_patch(command.entry_id, command.patch)
            .await?;
        Ok(entry)
    }
}
