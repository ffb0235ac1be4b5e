// In-memory implementation of the TaskDirectory port. Task and project CRUD
// live outside this subsystem; this adapter is the read model those
// collaborators expose to the timer core.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::time_entries::core::ports::{StoreError, TaskDirectory, TaskRef};

pub struct InMemoryTaskDirectory {
    inner: RwLock<HashMap<Uuid, TaskRef>>,
    offline: bool,
}

impl InMemoryTaskDirectory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            offline: false,
        }
    }

    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    pub async fn insert(&self, task: TaskRef) {
        self.inner.write().await.insert(task.id, task);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Backend("task directory offline".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryTaskDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskDirectory for InMemoryTaskDirectory {
    async fn get(&self, task_id: Uuid) -> Result<Option<TaskRef>, StoreError> {
        self.check_online()?;
        Ok(self.inner.read().await.get(&task_id).cloned())
    }

    async fn owned_by(&self, user_id: Uuid) -> Result<Vec<TaskRef>, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        let mut tasks: Vec<TaskRef> = guard
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }
}
