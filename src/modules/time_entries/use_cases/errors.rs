use thiserror::Error;
use uuid::Uuid;

use crate::modules::time_entries::core::ports::StoreError;

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("task {0} not found")]
    TaskNotFound(Uuid),

    #[error("task {0} does not belong to the caller")]
    Forbidden(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TimerError {
    /// Business-rule conflicts (already running, already stopped) as opposed
    /// to missing references or infrastructure failures.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            TimerError::Store(StoreError::RunningTimerExists { .. })
                | TimerError::Store(StoreError::AlreadyStopped(_))
        )
    }
}
