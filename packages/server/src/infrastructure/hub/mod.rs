//! WebSocket fan-out hub.
//!
//! ## Responsibility
//!
//! - Track live connection membership per stream chat room
//! - Fan messages out to every member of a room, tolerating individual
//!   connection failures without disrupting the group
//!
//! ## Design notes
//!
//! The WebSocket itself is accepted in the UI layer
//! (`src/ui/handler/websocket.rs`); the hub only holds each connection's
//! outbound channel. Sends to that channel never block, and the actual
//! socket writes happen in a per-connection writer task, so a slow peer
//! cannot stall a broadcast. Rooms are independent units of concurrency;
//! the single registry lock is held only for membership mutation and for
//! snapshotting, never across socket I/O.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, OutboundChannel, StreamKey};

/// Room registry: stream key -> room, room -> outbound channel per connection.
///
/// Owned outside the hub and passed in at construction, keeping the
/// process-wide mutable state explicit rather than a module-level global.
pub type RoomRegistry = Mutex<HashMap<StreamKey, HashMap<ConnectionId, OutboundChannel>>>;

/// Per-stream broadcast hub over the shared room registry.
pub struct ChatHub {
    rooms: Arc<RoomRegistry>,
}

impl ChatHub {
    pub fn new(rooms: Arc<RoomRegistry>) -> Self {
        Self { rooms }
    }

    /// Register a connection under the room for `stream_key`, creating the
    /// room lazily on first join. Membership is uncapped; bounds are the
    /// process's resources.
    pub async fn register(
        &self,
        stream_key: &StreamKey,
        connection_id: ConnectionId,
        channel: OutboundChannel,
    ) {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(stream_key.clone()).or_default();
        room.insert(connection_id, channel);
        tracing::info!(
            "Connection '{}' joined stream '{}'. Total connections: {}",
            connection_id,
            stream_key.as_str(),
            room.len()
        );
    }

    /// Remove a connection from its room. Idempotent: unknown rooms and
    /// connections are a no-op. The room entry is dropped once it empties so
    /// the registry never accumulates dead rooms over the server's lifetime.
    pub async fn unregister(&self, stream_key: &StreamKey, connection_id: &ConnectionId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(room) = rooms.get_mut(stream_key) {
            if room.remove(connection_id).is_some() {
                tracing::info!(
                    "Connection '{}' left stream '{}'. Total connections: {}",
                    connection_id,
                    stream_key.as_str(),
                    room.len()
                );
            }
            if room.is_empty() {
                rooms.remove(stream_key);
                tracing::debug!("Room for stream '{}' is empty, dropping it", stream_key.as_str());
            }
        }
    }

    /// Fan a serialized payload out to every member of the room, sender
    /// included. Membership is snapshotted under the lock and the sends run
    /// outside it, so a join or leave racing an in-flight broadcast never
    /// trips the iteration. Members whose channel is gone are pruned as an
    /// implicit leave; one member's failure never aborts delivery to the
    /// rest.
    ///
    /// Returns the number of members the payload was delivered to.
    pub async fn broadcast(&self, stream_key: &StreamKey, payload: &str) -> usize {
        let members: Vec<(ConnectionId, OutboundChannel)> = {
            let rooms = self.rooms.lock().await;
            match rooms.get(stream_key) {
                Some(room) => room.iter().map(|(id, tx)| (*id, tx.clone())).collect(),
                None => return 0,
            }
        };

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (connection_id, channel) in members {
            if channel.send(payload.to_string()).is_err() {
                tracing::warn!(
                    "Failed to deliver message to connection '{}' on stream '{}'",
                    connection_id,
                    stream_key.as_str()
                );
                failed.push(connection_id);
            } else {
                delivered += 1;
            }
        }

        // Dead channels mean the writer task is gone; treat as a leave
        for connection_id in failed {
            self.unregister(stream_key, &connection_id).await;
        }

        delivered
    }

    /// Number of connections currently in the room for `stream_key`.
    pub async fn member_count(&self, stream_key: &StreamKey) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.get(stream_key).map_or(0, |room| room.len())
    }

    /// Whether a room currently exists for `stream_key`.
    pub async fn has_room(&self, stream_key: &StreamKey) -> bool {
        self.rooms.lock().await.contains_key(stream_key)
    }

    /// Occupancy snapshot of all active rooms.
    pub async fn rooms_snapshot(&self) -> Vec<(StreamKey, usize)> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .map(|(key, room)| (key.clone(), room.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn create_test_hub() -> ChatHub {
        ChatHub::new(Arc::new(Mutex::new(HashMap::new())))
    }

    fn create_test_channel() -> (OutboundChannel, mpsc::UnboundedReceiver<String>) {
        mpsc::unbounded_channel()
    }

    #[tokio::test]
    async fn test_register_creates_room_lazily() {
        // given:
        let hub = create_test_hub();
        let key = StreamKey::new("abc123");
        assert!(!hub.has_room(&key).await);

        // when:
        let (tx, _rx) = create_test_channel();
        hub.register(&key, ConnectionId::generate(), tx).await;

        // then:
        assert!(hub.has_room(&key).await);
        assert_eq!(hub.member_count(&key).await, 1);
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // given:
        let hub = create_test_hub();
        let key = StreamKey::new("abc123");
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let (tx1, _rx1) = create_test_channel();
        let (tx2, _rx2) = create_test_channel();
        hub.register(&key, alice, tx1).await;
        hub.register(&key, bob, tx2).await;

        // when: removing alice twice
        hub.unregister(&key, &alice).await;
        hub.unregister(&key, &alice).await;

        // then: membership decreased exactly once
        assert_eq!(hub.member_count(&key).await, 1);
    }

    #[tokio::test]
    async fn test_room_is_dropped_when_last_member_leaves() {
        // given:
        let hub = create_test_hub();
        let key = StreamKey::new("abc123");
        let alice = ConnectionId::generate();
        let (tx, _rx) = create_test_channel();
        hub.register(&key, alice, tx).await;

        // when:
        hub.unregister(&key, &alice).await;

        // then: no retained empty room
        assert!(!hub.has_room(&key).await);
        assert_eq!(hub.rooms_snapshot().await.len(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_includes_the_sender() {
        // given: a room with three members
        let hub = create_test_hub();
        let key = StreamKey::new("abc123");
        let (tx_a, mut rx_a) = create_test_channel();
        let (tx_b, mut rx_b) = create_test_channel();
        let (tx_c, mut rx_c) = create_test_channel();
        hub.register(&key, ConnectionId::generate(), tx_a).await;
        hub.register(&key, ConnectionId::generate(), tx_b).await;
        hub.register(&key, ConnectionId::generate(), tx_c).await;

        // when:
        let delivered = hub.broadcast(&key, "hello").await;

        // then: all three receive the payload, sender not excluded
        assert_eq!(delivered, 3);
        assert_eq!(rx_a.recv().await, Some("hello".to_string()));
        assert_eq!(rx_b.recv().await, Some("hello".to_string()));
        assert_eq!(rx_c.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_prunes_dead_members_without_aborting() {
        // given: bob's receiver is gone, simulating a broken transport
        let hub = create_test_hub();
        let key = StreamKey::new("abc123");
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let charlie = ConnectionId::generate();
        let (tx_a, mut rx_a) = create_test_channel();
        let (tx_b, rx_b) = create_test_channel();
        let (tx_c, mut rx_c) = create_test_channel();
        hub.register(&key, alice, tx_a).await;
        hub.register(&key, bob, tx_b).await;
        hub.register(&key, charlie, tx_c).await;
        drop(rx_b);

        // when:
        let delivered = hub.broadcast(&key, "hello").await;

        // then: delivery to alice and charlie succeeded, bob was removed
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await, Some("hello".to_string()));
        assert_eq!(rx_c.recv().await, Some("hello".to_string()));
        assert_eq!(hub.member_count(&key).await, 2);
    }

    #[tokio::test]
    async fn test_broadcast_is_scoped_to_one_room() {
        // given: two concurrently active rooms
        let hub = create_test_hub();
        let key1 = StreamKey::new("stream-1");
        let key2 = StreamKey::new("stream-2");
        let (tx1, mut rx1) = create_test_channel();
        let (tx2, mut rx2) = create_test_channel();
        hub.register(&key1, ConnectionId::generate(), tx1).await;
        hub.register(&key2, ConnectionId::generate(), tx2).await;

        // when:
        let delivered = hub.broadcast(&key1, "only room 1").await;

        // then:
        assert_eq!(delivered, 1);
        assert_eq!(rx1.recv().await, Some("only room 1".to_string()));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_to_unknown_room_delivers_nothing() {
        // given:
        let hub = create_test_hub();

        // when:
        let delivered = hub.broadcast(&StreamKey::new("nobody-home"), "hello").await;

        // then:
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_rooms_snapshot_reports_occupancy() {
        // given:
        let hub = create_test_hub();
        let key = StreamKey::new("abc123");
        let (tx1, _rx1) = create_test_channel();
        let (tx2, _rx2) = create_test_channel();
        hub.register(&key, ConnectionId::generate(), tx1).await;
        hub.register(&key, ConnectionId::generate(), tx2).await;

        // when:
        let snapshot = hub.rooms_snapshot().await;

        // then:
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].0, key);
        assert_eq!(snapshot[0].1, 2);
    }
}
