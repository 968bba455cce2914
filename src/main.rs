// RoomSense: temperature/humidity monitor with rolling history and live push.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;

use roomsense_server::app::{AppState, HistoryStore};
use roomsense_server::constants::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_HTTP_PORT, DEFAULT_SAMPLE_INTERVAL_MS,
};
use roomsense_server::http;
use roomsense_server::notify::LiveNotifier;
use roomsense_server::sampling;
use roomsense_server::sensor;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let bind = env::var("HTTP_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("HTTP_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_HTTP_PORT);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .expect("invalid HTTP_BIND or HTTP_PORT");

    let interval_ms = env::var("SAMPLE_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SAMPLE_INTERVAL_MS);
    let capacity = env::var("HISTORY_CAPACITY")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_HISTORY_CAPACITY);

    // Capacity and interval together define the retention window; log the
    // derived value so a mismatched pair is visible at startup.
    let retention_hours = (capacity as u64 * interval_ms) as f64 / 3_600_000.0;
    info!(capacity, interval_ms, retention_hours, "history window configured");

    let store = Arc::new(RwLock::new(HistoryStore::new(capacity)));
    let notifier = Arc::new(LiveNotifier::new());
    let sensor = sensor::shared(sensor::from_env().expect("failed to initialize sensor"));
    let start_instant = Instant::now();

    let sampler_store = store.clone();
    let sampler_notifier = notifier.clone();
    tokio::spawn(async move {
        sampling::sampling_task(
            sampler_store,
            sampler_notifier,
            sensor,
            start_instant,
            interval_ms,
        )
        .await;
    });

    let app_state = AppState {
        store,
        notifier,
        start_instant,
    };
    let app = http::router(app_state);

    info!(%addr, "starting server");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server failed");
}
