//! UseCase: relay one inbound chat payload to its room.

use std::sync::Arc;

use xatube_shared::time::Clock;

use crate::{
    domain::{ChatMessage, StreamKey, Timestamp},
    infrastructure::{ChatHub, dto::websocket::{InboundChatMessage, OutboundChatMessage}},
};

/// Receive-validate-broadcast, fire-and-forget.
///
/// Malformed JSON and whitespace-only text drop the payload silently; the
/// sender is never told. A payload that survives validation is stamped with
/// the current UTC time and fanned out to the whole room, sender included.
pub struct RelayChatMessageUseCase {
    hub: Arc<ChatHub>,
    clock: Arc<dyn Clock>,
}

impl RelayChatMessageUseCase {
    pub fn new(hub: Arc<ChatHub>, clock: Arc<dyn Clock>) -> Self {
        Self { hub, clock }
    }

    /// Returns the delivery count for a broadcast payload, `None` when the
    /// payload was dropped. The return value is for observation only and is
    /// never reported back to the sender.
    pub async fn execute(&self, stream_key: &StreamKey, raw_payload: &str) -> Option<usize> {
        let inbound: InboundChatMessage = match serde_json::from_str(raw_payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(
                    "Dropping malformed chat payload on stream '{}': {}",
                    stream_key.as_str(),
                    e
                );
                return None;
            }
        };

        let timestamp = Timestamp::new(self.clock.now_utc_millis());
        let message =
            match ChatMessage::compose(&inbound.text, inbound.username, inbound.avatar, timestamp)
            {
                Some(message) => message,
                None => {
                    tracing::debug!(
                        "Dropping empty chat message on stream '{}'",
                        stream_key.as_str()
                    );
                    return None;
                }
            };

        tracing::info!(
            "Broadcasting message from '{}' on stream '{}'",
            message.username.as_str(),
            stream_key.as_str()
        );

        let payload = serde_json::to_string(&OutboundChatMessage::from(message)).unwrap();
        Some(self.hub.broadcast(stream_key, &payload).await)
    }
}
