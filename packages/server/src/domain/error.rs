//! Domain errors.

use thiserror::Error;

/// Errors surfaced when a client attempts to join a stream chat room.
///
/// This is the only failure the chat protocol ever reports to a client;
/// everything after a successful join is fire-and-forget.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinChatError {
    /// The stream key does not resolve to any known channel
    #[error("unknown stream key '{0}'")]
    UnknownStream(String),
}
