//! UseCase layer: one type per chat hub operation.

mod disconnect_chat;
mod join_stream_chat;
mod relay_chat_message;

pub use disconnect_chat::DisconnectChatUseCase;
pub use join_stream_chat::JoinStreamChatUseCase;
pub use relay_chat_message::RelayChatMessageUseCase;
