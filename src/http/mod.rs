// HTTP handlers and routing.

use axum::extract::State as AxumState;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};

use crate::app::AppState;
use crate::utils::{monotonic_ms, now_epoch_ms};
use crate::ws::ws_handler;

mod types;
use types::*;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/data", get(get_history))
        .route("/debug/status", get(get_status))
        .route("/ws", get(ws_handler))
        .with_state(app_state)
}

async fn index() -> impl IntoResponse {
    Html(include_str!("../../assets/index.html"))
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// History snapshot, oldest first. Always 200, empty list before the first
/// accepted sample.
async fn get_history(AxumState(app_state): AxumState<AppState>) -> impl IntoResponse {
    let readings = {
        let store = app_state.store.read().await;
        store.history.snapshot()
    };
    Json(readings)
}

async fn get_status(AxumState(app_state): AxumState<AppState>) -> impl IntoResponse {
    let subscribers = app_state.notifier.subscriber_count().await;
    let store = app_state.store.read().await;
    Json(StatusResponse {
        timestamp_ms: now_epoch_ms(),
        uptime_ms: monotonic_ms(app_state.start_instant),
        samples_accepted: store.samples_accepted,
        samples_rejected: store.samples_rejected,
        history_len: store.history.len(),
        history_capacity: store.history.capacity(),
        last_sample_ms: store.last_sample_ms,
        last_reject_ms: store.last_reject_ms,
        latest: store.latest,
        subscribers,
    })
}
