// Application state shared between the sampling task and the HTTP server.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::buffers::RingBuffer;
use crate::model::Reading;
use crate::notify::LiveNotifier;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<HistoryStore>>,
    pub notifier: Arc<LiveNotifier>,
    pub start_instant: Instant,
}

/// Single-writer store: only the sampling task mutates it, HTTP handlers and
/// websocket sessions take read locks.
pub struct HistoryStore {
    pub history: RingBuffer<Reading>,
    pub latest: Option<Reading>,
    pub samples_accepted: u64,
    pub samples_rejected: u64,
    pub last_sample_ms: Option<u64>,
    pub last_reject_ms: Option<u64>,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: RingBuffer::new(capacity),
            latest: None,
            samples_accepted: 0,
            samples_rejected: 0,
            last_sample_ms: None,
            last_reject_ms: None,
        }
    }
}
