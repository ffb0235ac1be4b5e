// Purpose: periodic broadcast of running timers to their owners.
// Responsibilities: every interval, collect running entries, group them per
// owner, and publish one batch per user over the sync channel. A failed
// cycle is logged and retried after a backoff; the loop never dies.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::modules::time_entries::core::entry::{TimeEntry, TimerSync};
use crate::modules::time_entries::core::ports::{SyncChannel, TaskDirectory, TimerStore};

pub struct TimerBroadcaster {
    store: Arc<dyn TimerStore>,
    tasks: Arc<dyn TaskDirectory>,
    channel: Arc<dyn SyncChannel>,
    interval: Duration,
    backoff: Duration,
}

/// Group running entries per owning user. Entries whose owner cannot be
/// resolved are skipped.
pub fn sync_batches(
    entries: &[(TimeEntry, Option<Uuid>)],
    now: chrono::DateTime<Utc>,
) -> BTreeMap<Uuid, Vec<TimerSync>> {
    let mut batches: BTreeMap<Uuid, Vec<TimerSync>> = BTreeMap::new();
    for (entry, owner) in entries {
        let Some(user_id) = owner else { continue };
        batches.entry(*user_id).or_default().push(TimerSync {
            id: entry.id,
            task_id: entry.task_id,
            start_time: entry.start_time,
            elapsed_seconds: (now - entry.start_time).num_seconds().max(0),
        });
    }
    batches
}

impl TimerBroadcaster {
    pub fn new(
        store: Arc<dyn TimerStore>,
        tasks: Arc<dyn TaskDirectory>,
        channel: Arc<dyn SyncChannel>,
        interval: Duration,
        backoff: Duration,
    ) -> Self {
        Self {
            store,
            tasks,
            channel,
            interval,
            backoff,
        }
    }

    async fn cycle(&self) -> anyhow::Result<usize> {
        let running = self.store.running().await?;
        let mut resolved = Vec::with_capacity(running.len());
        for entry in running {
            let owner = self
                .tasks
                .get(entry.task_id)
                .await?
                .map(|task| task.user_id);
            resolved.push((entry, owner));
        }

        let batches = sync_batches(&resolved, Utc::now());
        let mut published = 0;
        for (user_id, batch) in &batches {
            self.channel.publish(*user_id, batch).await?;
            published += 1;
        }
        Ok(published)
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(interval = ?self.interval, "timer broadcaster started");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.cycle().await {
                        Ok(published) if published > 0 => {
                            tracing::debug!(published, "timer sync batches published");
                        }
                        Ok(_) => {}
                        Err(error) => {
                            tracing::warn!(%error, "timer broadcast cycle failed");
                            tokio::time::sleep(self.backoff).await;
                        }
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("timer broadcaster stopped");
    }
}

#[cfg(test)]
mod broadcaster_tests {
    use chrono::TimeDelta;

    use super::*;

    fn running_entry(age_seconds: i64) -> TimeEntry {
        TimeEntry::started(Uuid::now_v7(), Utc::now() - TimeDelta::seconds(age_seconds))
    }

    #[test]
    fn it_should_group_batches_per_owner() {
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();
        let entries = vec![
            (running_entry(10), Some(alice)),
            (running_entry(20), Some(alice)),
            (running_entry(30), Some(bob)),
        ];

        let batches = sync_batches(&entries, Utc::now());

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[&alice].len(), 2);
        assert_eq!(batches[&bob].len(), 1);
    }

    #[test]
    fn it_should_skip_entries_without_a_resolvable_owner() {
        let entries = vec![(running_entry(10), None)];

        let batches = sync_batches(&entries, Utc::now());

        assert!(batches.is_empty());
    }

    #[test]
    fn it_should_report_elapsed_whole_seconds() {
        let owner = Uuid::now_v7();
        let entry = running_entry(0);
        let now = entry.start_time + TimeDelta::seconds(95);

        let batches = sync_batches(&[(entry, Some(owner))], now);

        assert_eq!(batches[&owner][0].elapsed_seconds, 95);
    }

    #[test]
    fn it_should_clamp_elapsed_at_zero_for_future_starts() {
        let owner = Uuid::now_v7();
        let entry = running_entry(0);
        let now = entry.start_time - TimeDelta::seconds(5);

        let batches = sync_batches(&[(entry, Some(owner))], now);

        assert_eq!(batches[&owner][0].elapsed_seconds, 0);
    }
}
