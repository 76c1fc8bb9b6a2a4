//! Chat message entity.

use super::value_object::{DisplayName, MessageText, Timestamp};

/// One chat message as broadcast to a room.
///
/// Not persisted: it exists only between the receiving connection and the
/// fan-out to the room's current members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: MessageText,
    pub username: DisplayName,
    /// Client-asserted avatar reference, passed through unverified
    pub avatar: Option<String>,
    /// Server-stamped send time
    pub timestamp: Timestamp,
}

impl ChatMessage {
    /// Build a message from raw client input and a server-side timestamp.
    ///
    /// Returns `None` when the text is empty after trimming; the caller is
    /// expected to drop the payload silently in that case.
    pub fn compose(
        raw_text: &str,
        username: Option<String>,
        avatar: Option<String>,
        timestamp: Timestamp,
    ) -> Option<Self> {
        let text = MessageText::new(raw_text)?;
        Some(Self {
            text,
            username: DisplayName::from_option(username),
            avatar,
            timestamp,
        })
    }
}
