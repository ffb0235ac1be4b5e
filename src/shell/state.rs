// Purpose: wire the use case handlers to their adapters once, at startup.

use std::sync::Arc;

use crate::modules::stats::use_cases::StatsHandler;
use crate::modules::time_entries::core::ports::{TaskDirectory, TimerStore};
use crate::modules::time_entries::use_cases::delete_entry::DeleteEntryHandler;
use crate::modules::time_entries::use_cases::list_entries::ListEntriesHandler;
use crate::modules::time_entries::use_cases::start_timer::StartTimerHandler;
use crate::modules::time_entries::use_cases::stop_timer::StopTimerHandler;
use crate::modules::time_entries::use_cases::update_entry::UpdateEntryHandler;
use crate::shared::infrastructure::realtime::hub::SyncHub;

#[derive(Clone)]
pub struct AppState {
    pub start_timer: Arc<StartTimerHandler>,
    pub stop_timer: Arc<StopTimerHandler>,
    pub update_entry: Arc<UpdateEntryHandler>,
    pub delete_entry: Arc<DeleteEntryHandler>,
    pub list_entries: Arc<ListEntriesHandler>,
    pub stats: Arc<StatsHandler>,
    pub hub: Arc<SyncHub>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TimerStore>,
        tasks: Arc<dyn TaskDirectory>,
        hub: Arc<SyncHub>,
    ) -> Self {
        Self {
            start_timer: Arc::new(StartTimerHandler::new(
                Arc::clone(&store),
                Arc::clone(&tasks),
            )),
            stop_timer: Arc::new(StopTimerHandler::new(Arc::clone(&store))),
            update_entry: Arc::new(UpdateEntryHandler::new(Arc::clone(&store))),
            delete_entry: Arc::new(DeleteEntryHandler::new(Arc::clone(&store))),
            list_entries: Arc::new(ListEntriesHandler::new(
                Arc::clone(&store),
                Arc::clone(&tasks),
            )),
            stats: Arc::new(StatsHandler::new(store, tasks)),
            hub,
        }
    }
}
