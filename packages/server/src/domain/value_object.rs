//! Value objects for the stream chat domain.

use uuid::Uuid;

/// Maximum number of characters a chat message may carry after trimming.
/// Longer messages are clamped, never rejected.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Default display name for clients that do not assert one.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// Stream key identifying one channel's live stream.
///
/// Opaque, caller-supplied and unauthenticated; it is only ever compared for
/// equality and resolved through the stream directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamKey(String);

impl StreamKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Identity of one open chat connection within the room registry.
///
/// Generated server-side on join; clients never see or supply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated chat message text.
///
/// Construction trims surrounding whitespace, refuses text that is empty
/// after trimming, and clamps anything longer than [`MAX_MESSAGE_CHARS`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// Returns `None` when the text is empty after trimming. Oversize text
    /// is truncated, matching the original clamp-not-reject protocol.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        // Truncate on character boundaries, not bytes
        let text = if trimmed.chars().count() > MAX_MESSAGE_CHARS {
            trimmed.chars().take(MAX_MESSAGE_CHARS).collect()
        } else {
            trimmed.to_string()
        };
        Some(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Client-asserted display name shown next to chat messages.
///
/// Unverified by design: chat participation is anonymous and the name is
/// taken as-is, defaulting only when the client sends none at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Absent name falls back to the anonymous placeholder; a supplied name
    /// is kept verbatim, even when empty.
    pub fn from_option(name: Option<String>) -> Self {
        match name {
            Some(name) => Self(name),
            None => Self(ANONYMOUS_DISPLAY_NAME.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp in UTC (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
