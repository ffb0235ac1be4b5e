// Purpose: client-side view of running timers, kept warm between server
// syncs.
// Responsibilities: track at most one running timer per task, advance the
// elapsed counter locally every second, and let a server batch overwrite the
// local guess without resurrecting timers the user already stopped.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::time_entries::core::entry::TimerSync;

#[derive(Debug, Clone, PartialEq)]
pub struct RunningTimer {
    pub entry_id: Uuid,
    pub task_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub elapsed_seconds: i64,
}

#[derive(Debug, Default)]
pub struct TimerProjection {
    running: HashMap<Uuid, RunningTimer>,
}

impl TimerProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_start(&mut self, entry_id: Uuid, task_id: Uuid, start_time: DateTime<Utc>) {
        self.running.insert(
            task_id,
            RunningTimer {
                entry_id,
                task_id,
                start_time,
                elapsed_seconds: 0,
            },
        );
    }

    pub fn apply_stop(&mut self, entry_id: Uuid) -> Option<RunningTimer> {
        let task_id = self
            .running
            .values()
            .find(|timer| timer.entry_id == entry_id)
            .map(|timer| timer.task_id)?;
        self.running.remove(&task_id)
    }

    /// Local tick between server syncs.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for timer in self.running.values_mut() {
            timer.elapsed_seconds = (now - timer.start_time).num_seconds().max(0);
        }
    }

    /// Server sync overwrites local state for timers we already know about.
    /// Entries for unknown tasks or mismatched ids are ignored so that a
    /// stale batch cannot resurrect a timer stopped moments ago.
    pub fn apply_sync(&mut self, batch: &[TimerSync]) {
        for sync in batch {
            if let Some(timer) = self.running.get_mut(&sync.task_id) {
                if timer.entry_id == sync.id {
                    timer.start_time = sync.start_time;
                    timer.elapsed_seconds = sync.elapsed_seconds;
                }
            }
        }
    }

    pub fn get(&self, task_id: Uuid) -> Option<&RunningTimer> {
        self.running.get(&task_id)
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

#[cfg(test)]
mod projection_tests {
    use chrono::TimeDelta;

    use super::*;

    fn started(projection: &mut TimerProjection) -> (Uuid, Uuid, DateTime<Utc>) {
        let entry_id = Uuid::now_v7();
        let task_id = Uuid::now_v7();
        let start = Utc::now() - TimeDelta::seconds(10);
        projection.apply_start(entry_id, task_id, start);
        (entry_id, task_id, start)
    }

    #[test]
    fn it_should_track_a_started_timer_from_zero() {
        let mut projection = TimerProjection::new();
        let (entry_id, task_id, start) = started(&mut projection);

        let timer = projection.get(task_id).unwrap();
        assert_eq!(timer.entry_id, entry_id);
        assert_eq!(timer.start_time, start);
        assert_eq!(timer.elapsed_seconds, 0);
    }

    #[test]
    fn it_should_advance_elapsed_on_tick() {
        let mut projection = TimerProjection::new();
        let (_, task_id, start) = started(&mut projection);

        projection.tick(start + TimeDelta::seconds(42));

        assert_eq!(projection.get(task_id).unwrap().elapsed_seconds, 42);
    }

    #[test]
    fn it_should_never_tick_below_zero() {
        let mut projection = TimerProjection::new();
        let (_, task_id, start) = started(&mut projection);

        projection.tick(start - TimeDelta::seconds(5));

        assert_eq!(projection.get(task_id).unwrap().elapsed_seconds, 0);
    }

    #[test]
    fn it_should_remove_a_stopped_timer_by_entry_id() {
        let mut projection = TimerProjection::new();
        let (entry_id, task_id, _) = started(&mut projection);

        let removed = projection.apply_stop(entry_id);

        assert_eq!(removed.map(|timer| timer.task_id), Some(task_id));
        assert!(projection.is_empty());
    }

    #[test]
    fn it_should_overwrite_known_timers_on_sync() {
        let mut projection = TimerProjection::new();
        let (entry_id, task_id, start) = started(&mut projection);
        let corrected = start - TimeDelta::seconds(3);

        projection.apply_sync(&[TimerSync {
            id: entry_id,
            task_id,
            start_time: corrected,
            elapsed_seconds: 13,
        }]);

        let timer = projection.get(task_id).unwrap();
        assert_eq!(timer.start_time, corrected);
        assert_eq!(timer.elapsed_seconds, 13);
    }

    #[test]
    fn it_should_ignore_sync_entries_for_unknown_or_replaced_timers() {
        let mut projection = TimerProjection::new();
        let (_, task_id, start) = started(&mut projection);

        projection.apply_sync(&[
            TimerSync {
                id: Uuid::now_v7(),
                task_id,
                start_time: start - TimeDelta::hours(1),
                elapsed_seconds: 3600,
            },
            TimerSync {
                id: Uuid::now_v7(),
                task_id: Uuid::now_v7(),
                start_time: start,
                elapsed_seconds: 10,
            },
        ]);

        assert_eq!(projection.len(), 1);
        assert_eq!(projection.get(task_id).unwrap().elapsed_seconds, 0);
    }
}
