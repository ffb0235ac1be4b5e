// Purpose: fan running-timer batches out to connected sockets.
// Responsibilities: keep per-user subscriber groups, serialize each batch
// once, and drop subscribers whose receiving end is gone.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::time_entries::core::entry::TimerSync;
use crate::modules::time_entries::core::ports::{ChannelError, SyncChannel};

pub const SYNC_EVENT: &str = "timerSync";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncEnvelope<'a> {
    event: &'static str,
    payload: &'a [TimerSync],
}

#[derive(Default)]
pub struct SyncHub {
    groups: RwLock<HashMap<Uuid, Vec<mpsc::UnboundedSender<String>>>>,
}

impl SyncHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe() -> (mpsc::UnboundedSender<String>, mpsc::UnboundedReceiver<String>) {
        mpsc::unbounded_channel()
    }

    pub async fn join(&self, user_id: Uuid, sender: &mpsc::UnboundedSender<String>) {
        let mut groups = self.groups.write().await;
        let subscribers = groups.entry(user_id).or_default();
        if !subscribers.iter().any(|tx| tx.same_channel(sender)) {
            subscribers.push(sender.clone());
        }
    }

    pub async fn leave(&self, user_id: Uuid, sender: &mpsc::UnboundedSender<String>) {
        let mut groups = self.groups.write().await;
        if let Some(subscribers) = groups.get_mut(&user_id) {
            subscribers.retain(|tx| !tx.same_channel(sender));
            if subscribers.is_empty() {
                groups.remove(&user_id);
            }
        }
    }

    pub async fn subscriber_count(&self, user_id: Uuid) -> usize {
        self.groups
            .read()
            .await
            .get(&user_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl SyncChannel for SyncHub {
    async fn publish(&self, user_id: Uuid, batch: &[TimerSync]) -> Result<(), ChannelError> {
        let message = serde_json::to_string(&SyncEnvelope {
            event: SYNC_EVENT,
            payload: batch,
        })
        .map_err(|error| ChannelError::Backend(error.to_string()))?;

        let mut groups = self.groups.write().await;
        if let Some(subscribers) = groups.get_mut(&user_id) {
            subscribers.retain(|tx| tx.send(message.clone()).is_ok());
            if subscribers.is_empty() {
                groups.remove(&user_id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod hub_tests {
    use chrono::Utc;

    use super::*;

    fn sync_of(elapsed_seconds: i64) -> TimerSync {
        TimerSync {
            id: Uuid::now_v7(),
            task_id: Uuid::now_v7(),
            start_time: Utc::now(),
            elapsed_seconds,
        }
    }

    #[tokio::test]
    async fn it_should_deliver_a_batch_to_group_members() {
        let hub = SyncHub::new();
        let user_id = Uuid::now_v7();
        let (tx, mut rx) = SyncHub::subscribe();
        hub.join(user_id, &tx).await;

        hub.publish(user_id, &[sync_of(42)]).await.unwrap();

        let message = rx.recv().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&message).unwrap();
        assert_eq!(value["event"], SYNC_EVENT);
        assert_eq!(value["payload"][0]["elapsedSeconds"], 42);
    }

    #[tokio::test]
    async fn it_should_keep_groups_isolated() {
        let hub = SyncHub::new();
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();
        let (alice_tx, mut alice_rx) = SyncHub::subscribe();
        let (bob_tx, mut bob_rx) = SyncHub::subscribe();
        hub.join(alice, &alice_tx).await;
        hub.join(bob, &bob_tx).await;

        hub.publish(alice, &[sync_of(5)]).await.unwrap();

        assert!(alice_rx.recv().await.is_some());
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn it_should_prune_closed_subscribers() {
        let hub = SyncHub::new();
        let user_id = Uuid::now_v7();
        let (tx, rx) = SyncHub::subscribe();
        hub.join(user_id, &tx).await;
        drop(rx);

        hub.publish(user_id, &[sync_of(1)]).await.unwrap();

        assert_eq!(hub.subscriber_count(user_id).await, 0);
    }

    #[tokio::test]
    async fn it_should_honor_explicit_join_and_leave() {
        let hub = SyncHub::new();
        let user_id = Uuid::now_v7();
        let (tx, _rx) = SyncHub::subscribe();

        hub.join(user_id, &tx).await;
        hub.join(user_id, &tx).await;
        assert_eq!(hub.subscriber_count(user_id).await, 1);

        hub.leave(user_id, &tx).await;
        assert_eq!(hub.subscriber_count(user_id).await, 0);
    }
}
