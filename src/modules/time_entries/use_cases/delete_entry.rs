// Purpose: remove an entry permanently.

use std::sync::Arc;

use uuid::Uuid;

use crate::modules::time_entries::core::ports::TimerStore;
use crate::modules::time_entries::use_cases::errors::TimerError;

#[derive(Debug, Clone, Copy)]
pub struct DeleteEntry {
    pub entry_id: Uuid,
}

pub struct DeleteEntryHandler {
    store: Arc<dyn TimerStore>,
}

impl DeleteEntryHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: DeleteEntry) -> Result<(), TimerError> {
        self.store.remove(command.entry_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod delete_entry_tests {
    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::modules::time_entries::adapters::in_memory_store::InMemoryTimerStore;
    use crate::modules::time_entries::core::entry::TimeEntry;
    use crate::modules::time_entries::core::ports::StoreError;

    struct World {
        store: Arc<InMemoryTimerStore>,
        handler: DeleteEntryHandler,
    }

    #[fixture]
    async fn before_each() -> World {
        let store = Arc::new(InMemoryTimerStore::new());
        World {
            store: Arc::clone(&store),
            handler: DeleteEntryHandler::new(store),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_an_existing_entry(#[future] before_each: World) {
        let world = before_each.await;
        let entry = TimeEntry::started(Uuid::now_v7(), Utc::now());
        world.store.insert_running(entry.clone()).await.unwrap();

        world
            .handler
            .handle(DeleteEntry { entry_id: entry.id })
            .await
            .unwrap();

        let again = world.handler.handle(DeleteEntry { entry_id: entry.id }).await;
        assert!(matches!(
            again,
            Err(TimerError::Store(StoreError::EntryNotFound(_)))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_an_unknown_entry(#[future] before_each: World) {
        let world = before_each.await;
        let missing = Uuid::now_v7();

        let result = world.handler.handle(DeleteEntry { entry_id: missing }).await;

        assert!(matches!(
            result,
            Err(TimerError::Store(StoreError::EntryNotFound(id))) if id == missing
        ));
    }
}
