//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, JoinChatError, StreamKey},
    ui::state::AppState,
};

/// `GET /api/streams/ws/{stream_key}/chat`
///
/// The stream key is validated only after the handshake: an unknown key is
/// answered with a normal close frame, never an HTTP error, so the client
/// sees a clean closure either way.
pub async fn stream_chat_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(stream_key): Path<String>,
) -> impl IntoResponse {
    let stream_key = StreamKey::new(stream_key);
    ws.on_upgrade(move |socket| handle_socket(socket, state, stream_key))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink.
///
/// Broadcasts from the hub land on the channel; this task is the only place
/// the socket is written, so one slow or broken peer never blocks fan-out to
/// the rest of the room.
fn writer_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, stream_key: StreamKey) {
    let (mut sender, mut receiver) = socket.split();

    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    // Validate the stream key before the connection enters any room
    match state
        .join_chat_usecase
        .execute(&stream_key, connection_id, tx)
        .await
    {
        Ok(()) => {
            tracing::info!(
                "Connection '{}' accepted for stream '{}'",
                connection_id,
                stream_key.as_str()
            );
        }
        Err(JoinChatError::UnknownStream(key)) => {
            tracing::warn!("Rejecting chat connection for unknown stream key '{}'", key);
            let _ = sender
                .send(Message::Close(Some(CloseFrame {
                    code: close_code::NORMAL,
                    reason: "stream not found".into(),
                })))
                .await;
            return;
        }
    }

    // Outbound: drain broadcasts into this client's socket
    let mut send_task = writer_loop(rx, sender);

    // Inbound: relay every text frame; anything invalid is dropped inside
    // the use case without feedback to the sender
    let state_clone = state.clone();
    let stream_key_clone = stream_key.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!(
                        "WebSocket error on connection '{}': {}",
                        connection_id,
                        e
                    );
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    state_clone
                        .relay_chat_message_usecase
                        .execute(&stream_key_clone, &text)
                        .await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled by the WebSocket protocol layer
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Leave is idempotent; a connection already pruned by a failed broadcast
    // is a no-op here
    state
        .disconnect_chat_usecase
        .execute(&stream_key, &connection_id)
        .await;
    tracing::info!(
        "Connection '{}' disconnected from stream '{}'",
        connection_id,
        stream_key.as_str()
    );
}
