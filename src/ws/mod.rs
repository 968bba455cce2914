// WebSocket transport for live reading updates.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State as AxumState;
use axum::response::IntoResponse;
use futures::StreamExt;
use tracing::{info, warn};

use crate::app::AppState;
use crate::notify::LiveUpdate;

pub async fn ws_handler(
    AxumState(app_state): AxumState<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(mut socket: WebSocket, app_state: AppState) {
    let (id, mut rx) = app_state.notifier.subscribe().await;
    info!(subscriber = id, "ws connected");

    // Send the latest reading up front so the client paints immediately
    // instead of waiting out the sampling interval.
    let latest = { app_state.store.read().await.latest };
    if let Some(reading) = latest {
        if let Ok(payload) = serde_json::to_string(&LiveUpdate::from(&reading)) {
            if socket.send(Message::Text(payload)).await.is_err() {
                app_state.notifier.unsubscribe(id).await;
                return;
            }
        }
    }

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                match outbound {
                    Some(payload) => {
                        if socket.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            inbound = socket.next() => {
                match inbound {
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) => break,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!(?err, "ws error");
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    app_state.notifier.unsubscribe(id).await;
    info!(subscriber = id, "ws disconnected");
}
