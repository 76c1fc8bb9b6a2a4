//! Domain layer: value objects, the chat message entity and the interfaces
//! the chat service depends on.

mod directory;
mod entity;
mod error;
mod value_object;

#[cfg(test)]
pub use directory::MockStreamDirectory;
pub use directory::StreamDirectory;
pub use entity::ChatMessage;
pub use error::JoinChatError;
pub use value_object::{
    ANONYMOUS_DISPLAY_NAME, ConnectionId, DisplayName, MAX_MESSAGE_CHARS, MessageText, StreamKey,
    Timestamp,
};

/// Outbound channel handle for one chat connection.
///
/// Broadcast writes go through this channel and are drained by the
/// connection's writer task, so fan-out never blocks on socket I/O.
pub type OutboundChannel = tokio::sync::mpsc::UnboundedSender<String>;
