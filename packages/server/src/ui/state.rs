//! Shared application state.

use std::sync::Arc;

use crate::{
    infrastructure::{ChatHub, InMemoryStreamDirectory},
    usecase::{DisconnectChatUseCase, JoinStreamChatUseCase, RelayChatMessageUseCase},
};

/// Shared application state
pub struct AppState {
    /// UseCase for joining a stream's chat room
    pub join_chat_usecase: Arc<JoinStreamChatUseCase>,
    /// UseCase for leaving a chat room
    pub disconnect_chat_usecase: Arc<DisconnectChatUseCase>,
    /// UseCase for relaying one inbound payload
    pub relay_chat_message_usecase: Arc<RelayChatMessageUseCase>,
    /// Fan-out hub, read directly by the occupancy debug endpoint
    pub hub: Arc<ChatHub>,
    /// Stream directory, mutated by the RTMP hooks
    pub directory: Arc<InMemoryStreamDirectory>,
}
