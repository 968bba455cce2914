// Live fan-out of accepted readings to connected push subscribers.
// Delivery is best-effort: a full or closed subscriber queue never blocks the
// sampling task or delivery to the remaining subscribers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::constants::LIVE_QUEUE_DEPTH;
use crate::model::Reading;

/// Wire payload pushed to subscribers on every accepted sample.
#[derive(Serialize)]
pub struct LiveUpdate {
    #[serde(rename = "temperature")]
    pub temperature_c: f32,
    #[serde(rename = "humidity")]
    pub humidity_pct: f32,
}

impl From<&Reading> for LiveUpdate {
    fn from(reading: &Reading) -> Self {
        Self {
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
        }
    }
}

pub struct LiveNotifier {
    subscribers: Mutex<HashMap<u64, mpsc::Sender<String>>>,
    next_id: AtomicU64,
}

impl LiveNotifier {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn subscribe(&self) -> (u64, mpsc::Receiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(LIVE_QUEUE_DEPTH);
        self.subscribers.lock().await.insert(id, tx);
        info!(subscriber = id, "live subscriber connected");
        (id, rx)
    }

    pub async fn unsubscribe(&self, id: u64) {
        if self.subscribers.lock().await.remove(&id).is_some() {
            info!(subscriber = id, "live subscriber disconnected");
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    /// Serialize once and try-send to every subscriber queue. Closed queues
    /// are pruned; full queues drop this update for that subscriber only.
    pub async fn notify(&self, reading: &Reading) {
        let payload = match serde_json::to_string(&LiveUpdate::from(reading)) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(?err, "failed to serialize live update");
                return;
            }
        };

        let mut dead = Vec::new();
        let mut subscribers = self.subscribers.lock().await;
        for (id, tx) in subscribers.iter() {
            match tx.try_send(payload.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(subscriber = *id, "live queue full, dropping update");
                }
                Err(TrySendError::Closed(_)) => {
                    dead.push(*id);
                }
            }
        }
        for id in dead {
            subscribers.remove(&id);
            info!(subscriber = id, "live subscriber pruned");
        }
    }
}

impl Default for LiveNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(t_ms: u64) -> Reading {
        Reading {
            timestamp_ms: t_ms,
            temperature_c: 21.0,
            humidity_pct: 40.0,
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_all_subscribers() {
        let notifier = LiveNotifier::new();
        let (_id1, mut rx1) = notifier.subscribe().await;
        let (_id2, mut rx2) = notifier.subscribe().await;

        notifier.notify(&reading(1)).await;

        let p1 = rx1.recv().await.expect("first subscriber missed update");
        let p2 = rx2.recv().await.expect("second subscriber missed update");
        assert_eq!(p1, p2);
        assert!(p1.contains("\"temperature\""));
        assert!(p1.contains("\"humidity\""));
        // The live payload carries no timestamp field.
        assert!(!p1.contains("timestamp"));
    }

    #[tokio::test]
    async fn dead_subscriber_does_not_block_the_rest() {
        let notifier = LiveNotifier::new();
        let (_gone, rx1) = notifier.subscribe().await;
        let (_kept, mut rx2) = notifier.subscribe().await;
        drop(rx1);

        notifier.notify(&reading(1)).await;

        assert!(rx2.recv().await.is_some());
        assert_eq!(notifier.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn full_queue_drops_update_but_keeps_subscriber() {
        let notifier = LiveNotifier::new();
        let (_id, mut rx) = notifier.subscribe().await;

        for i in 0..(LIVE_QUEUE_DEPTH as u64 + 4) {
            notifier.notify(&reading(i)).await;
        }

        assert_eq!(notifier.subscriber_count().await, 1);
        let mut received = 0;
        while rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, LIVE_QUEUE_DEPTH);
    }

    #[tokio::test]
    async fn unsubscribe_removes_handle() {
        let notifier = LiveNotifier::new();
        let (id, _rx) = notifier.subscribe().await;
        assert_eq!(notifier.subscriber_count().await, 1);
        notifier.unsubscribe(id).await;
        assert_eq!(notifier.subscriber_count().await, 0);
    }
}
