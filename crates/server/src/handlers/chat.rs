//! Chat room WebSocket handler

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info};

use crate::config::AppState;

/// GET /chat
///
/// Upgrades to a WebSocket and joins the broadcast room.
pub async fn chat_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| chat_connection(socket, state))
}

/// Drives one chat connection until it closes.
///
/// A writer task drains the relay mailbox into the socket while this
/// task reads inbound frames and rebroadcasts every text message to
/// the whole room, the sender included.
async fn chat_connection(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (conn_id, mut mailbox) = state.relay.join();

    let send_task = tokio::spawn(async move {
        while let Some(text) = mailbox.recv().await {
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => {
                let delivered = state.relay.broadcast(text.as_str());
                debug!(
                    "[chat] Connection {} sent {} bytes to {} peer(s)",
                    conn_id,
                    text.len(),
                    delivered
                );
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.relay.leave(conn_id);
    send_task.abort();
    info!("[chat] Connection {} disconnected", conn_id);
}
