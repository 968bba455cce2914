// Periodic sensor sampling task: the single writer of the history store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::app::HistoryStore;
use crate::constants::SENSOR_READ_TIMEOUT_MS;
use crate::model::Reading;
use crate::notify::LiveNotifier;
use crate::sensor::{Measurement, SensorError, SharedSensor};
use crate::utils::monotonic_ms;

pub async fn sampling_task(
    store: Arc<RwLock<HistoryStore>>,
    notifier: Arc<LiveNotifier>,
    sensor: SharedSensor,
    start: Instant,
    interval_ms: u64,
) {
    let mut interval = time::interval(Duration::from_millis(interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let now_ms = monotonic_ms(start);
        sample_once(&store, &notifier, &sensor, now_ms).await;
    }
}

/// One Idle -> Sampling -> Idle transition. Returns whether the reading was
/// accepted. A rejected read mutates neither the history nor the latest
/// reading and triggers no live update.
pub async fn sample_once(
    store: &Arc<RwLock<HistoryStore>>,
    notifier: &LiveNotifier,
    sensor: &SharedSensor,
    now_ms: u64,
) -> bool {
    match read_with_timeout(sensor, SENSOR_READ_TIMEOUT_MS).await {
        Ok(measurement) => {
            let reading = Reading {
                timestamp_ms: now_ms,
                temperature_c: measurement.temperature_c,
                humidity_pct: measurement.humidity_pct,
            };
            apply_reading(store, reading).await;
            notifier.notify(&reading).await;
            debug!(
                t_ms = now_ms,
                temperature_c = reading.temperature_c,
                humidity_pct = reading.humidity_pct,
                "sample accepted"
            );
            true
        }
        Err(err) => {
            warn!(%err, "sensor read rejected, skipping cycle");
            mark_rejected(store, now_ms).await;
            false
        }
    }
}

pub async fn apply_reading(store: &Arc<RwLock<HistoryStore>>, reading: Reading) {
    let mut store = store.write().await;
    store.history.append(reading);
    store.latest = Some(reading);
    store.samples_accepted += 1;
    store.last_sample_ms = Some(reading.timestamp_ms);
}

async fn mark_rejected(store: &Arc<RwLock<HistoryStore>>, now_ms: u64) {
    let mut store = store.write().await;
    store.samples_rejected += 1;
    store.last_reject_ms = Some(now_ms);
}

/// Run the blocking hardware exchange on the blocking pool, bounded by a
/// timeout so a wedged bus cannot stall the sampling cadence. A read that
/// outlives the timeout finishes in the background and its result is
/// discarded; the next cycle waits on the sensor mutex.
pub async fn read_with_timeout(
    sensor: &SharedSensor,
    timeout_ms: u64,
) -> Result<Measurement, SensorError> {
    let sensor = sensor.clone();
    let handle = tokio::task::spawn_blocking(move || {
        let mut sensor = sensor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sensor.read()
    });

    match time::timeout(Duration::from_millis(timeout_ms), handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(SensorError::Task(join_err.to_string())),
        Err(_) => Err(SensorError::Timeout(timeout_ms)),
    }
}
