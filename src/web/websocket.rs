use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error};

use super::{accept_action, WebState};
use crate::types::Command;

#[derive(Serialize, Clone, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebSocketMessage {
    /// Sent once per connection, before any other message.
    Snapshot {
        session_id: String,
        commands: Vec<Command>,
    },
    #[serde(rename = "command")]
    Appended { index: usize, command: Command },
    Action { envelope: serde_json::Value },
    Error { message: String },
}

/// Upgrades `/ws` requests and mirrors the session to the client.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: WebState) {
    let (mut sender, mut receiver) = socket.split();

    let (snapshot, mut subscription) = state.session.log.subscribe();
    let mut actions_rx = state.actions_tx.subscribe();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<WebSocketMessage>();

    debug!(
        session = %state.session.id,
        subscribers = state.session.log.subscriber_count(),
        "WebSocket client connected"
    );

    let first = WebSocketMessage::Snapshot {
        session_id: state.session.id.to_string(),
        commands: snapshot,
    };

    let send_task = tokio::spawn(async move {
        if !send_json(&mut sender, &first).await {
            return;
        }
        loop {
            let msg = tokio::select! {
                delta = subscription.next() => match delta {
                    Some(delta) => WebSocketMessage::Appended {
                        index: delta.index,
                        command: delta.command,
                    },
                    None => break,
                },
                envelope = actions_rx.recv() => match envelope {
                    Ok(envelope) => match serde_json::from_str(&envelope) {
                        Ok(envelope) => WebSocketMessage::Action { envelope },
                        Err(e) => {
                            error!("Dropping unparsable action envelope: {}", e);
                            continue;
                        }
                    },
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        error!("WebSocket lagged by {} actions", n);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                reply = reply_rx.recv() => match reply {
                    Some(reply) => reply,
                    None => break,
                },
            };

            if !send_json(&mut sender, &msg).await {
                break;
            }
        }
    });

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Err(e) = accept_action(&state.session, &text) {
                    debug!("Rejected client action: {}", e);
                    let _ = reply_tx.send(WebSocketMessage::Error {
                        message: e.to_string(),
                    });
                }
            }
            Ok(Message::Close(_)) => {
                debug!("WebSocket client disconnected");
                break;
            }
            Err(e) => {
                error!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    send_task.abort();
}

async fn send_json<S>(sender: &mut S, msg: &WebSocketMessage) -> bool
where
    S: futures::Sink<Message> + Unpin,
{
    let json = match serde_json::to_string(msg) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize WebSocket message: {}", e);
            return true;
        }
    };
    sender.send(Message::Text(json)).await.is_ok()
}
