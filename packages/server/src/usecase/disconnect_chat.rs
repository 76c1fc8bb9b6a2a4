//! UseCase: remove a connection from its chat room.

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, StreamKey},
    infrastructure::ChatHub,
};

/// Leaving a chat room. Always succeeds; a connection that already left is
/// a no-op, and the room is dropped when it empties.
pub struct DisconnectChatUseCase {
    hub: Arc<ChatHub>,
}

impl DisconnectChatUseCase {
    pub fn new(hub: Arc<ChatHub>) -> Self {
        Self { hub }
    }

    pub async fn execute(&self, stream_key: &StreamKey, connection_id: &ConnectionId) {
        self.hub.unregister(stream_key, connection_id).await;
    }
}
