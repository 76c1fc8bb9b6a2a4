//! Stream directory interface.
//!
//! The chat service does not own channel data; it only needs to answer one
//! question at join time: does this stream key belong to a known channel?
//! The concrete lookup lives in the infrastructure layer (dependency
//! inversion), and the rest of the platform backend stays out of scope.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::value_object::StreamKey;

/// Lookup of stream identity, consulted once per join attempt.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StreamDirectory: Send + Sync {
    /// Whether the given stream key resolves to a known channel.
    async fn exists(&self, stream_key: &StreamKey) -> bool;
}
