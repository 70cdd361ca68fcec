use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use core_sim::Snapshot;
use runtime::SessionEvent;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
enum Greeting {
    Connected { snapshot: Snapshot },
}

pub async fn events_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| stream_events(socket, state))
}

async fn stream_events(mut socket: WebSocket, state: AppState) {
    let (snapshot, mut events) = state.sim().subscribe();
    if send_json(&mut socket, &Greeting::Connected { snapshot })
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => return,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => return,
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if send_event(&mut socket, &event).await.is_err() {
                            return;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "event subscriber lagged");
                        continue;
                    }
                    Err(RecvError::Closed) => return,
                }
            }
        }
    }
}

async fn send_event(socket: &mut WebSocket, event: &SessionEvent) -> Result<(), ()> {
    send_json(socket, event).await
}

async fn send_json<T: Serialize>(socket: &mut WebSocket, payload: &T) -> Result<(), ()> {
    let payload = serde_json::to_string(payload).map_err(|_| ())?;
    socket.send(Message::Text(payload)).await.map_err(|_| ())
}
