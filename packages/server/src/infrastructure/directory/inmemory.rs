//! In-memory stream directory implementation.
//!
//! Stands in for the platform's channel table: a map of registered stream
//! keys with a live flag toggled by the RTMP publish/unpublish hooks. Chat
//! joins validate key *existence* only, so a channel's chat stays reachable
//! between broadcasts, matching the platform's behavior.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{StreamDirectory, StreamKey};

/// In-memory `StreamDirectory` backed by a mutex-guarded map.
pub struct InMemoryStreamDirectory {
    /// Registered channels: stream key -> currently publishing
    channels: Mutex<HashMap<StreamKey, bool>>,
}

impl InMemoryStreamDirectory {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Create a directory pre-seeded with known stream keys, none live yet.
    pub fn with_keys(keys: impl IntoIterator<Item = StreamKey>) -> Self {
        Self {
            channels: Mutex::new(keys.into_iter().map(|key| (key, false)).collect()),
        }
    }

    /// Register a channel's stream key. Idempotent; re-registering keeps the
    /// current live flag.
    pub async fn register(&self, stream_key: StreamKey) {
        let mut channels = self.channels.lock().await;
        channels.entry(stream_key).or_insert(false);
    }

    /// Flag a registered stream as publishing. Returns `false` when the key
    /// is unknown, in which case the RTMP hook must refuse the publish.
    pub async fn mark_live(&self, stream_key: &StreamKey) -> bool {
        let mut channels = self.channels.lock().await;
        match channels.get_mut(stream_key) {
            Some(live) => {
                *live = true;
                true
            }
            None => false,
        }
    }

    /// Flag a registered stream as offline. Returns `false` when the key is
    /// unknown; unpublish is never blocked on that.
    pub async fn mark_offline(&self, stream_key: &StreamKey) -> bool {
        let mut channels = self.channels.lock().await;
        match channels.get_mut(stream_key) {
            Some(live) => {
                *live = false;
                true
            }
            None => false,
        }
    }

    /// Whether the stream is currently publishing.
    pub async fn is_live(&self, stream_key: &StreamKey) -> bool {
        let channels = self.channels.lock().await;
        channels.get(stream_key).copied().unwrap_or(false)
    }
}

impl Default for InMemoryStreamDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamDirectory for InMemoryStreamDirectory {
    async fn exists(&self, stream_key: &StreamKey) -> bool {
        let channels = self.channels.lock().await;
        channels.contains_key(stream_key)
    }
}
