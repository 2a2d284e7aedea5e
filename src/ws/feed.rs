//! Periodic push of the latest test records.

use std::time::Duration;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, warn};

use crate::api::AppState;

/// Interval between pushes to each connected client.
const PUSH_INTERVAL: Duration = Duration::from_secs(2);

/// How many of the most recent records each frame carries.
const FEED_LIMIT: i64 = 10;

/// `GET /ws/test-data` upgrades to the live feed.
pub async fn feed_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| push_loop(socket, state))
}

/// Push the latest records every tick until the client goes away.
///
/// Each connection polls independently; a slow or broken client only
/// ends its own loop.
async fn push_loop(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut interval = tokio::time::interval(PUSH_INTERVAL);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let records = match state.records.latest(FEED_LIMIT).await {
                    Ok(records) => records,
                    Err(err) => {
                        warn!(error = %err, "feed query failed");
                        continue;
                    }
                };

                let payload = match serde_json::to_string(&records) {
                    Ok(payload) => payload,
                    Err(err) => {
                        warn!(error = %err, "feed serialization failed");
                        continue;
                    }
                };

                if sender.send(Message::Text(payload.into())).await.is_err() {
                    debug!("feed client disconnected");
                    break;
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("feed client closed connection");
                        break;
                    }
                    Some(Err(err)) => {
                        debug!(error = %err, "feed receive error");
                        break;
                    }
                    // Ignore pings, pongs, and client chatter.
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}
