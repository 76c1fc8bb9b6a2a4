//! UseCase: join a stream's chat room.

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, JoinChatError, OutboundChannel, StreamDirectory, StreamKey},
    infrastructure::ChatHub,
};

/// Joining a chat room: validate the stream key against the directory,
/// then register the connection with the fan-out hub.
pub struct JoinStreamChatUseCase {
    directory: Arc<dyn StreamDirectory>,
    hub: Arc<ChatHub>,
}

impl JoinStreamChatUseCase {
    pub fn new(directory: Arc<dyn StreamDirectory>, hub: Arc<ChatHub>) -> Self {
        Self { directory, hub }
    }

    /// Validate and register.
    ///
    /// The directory is consulted fresh on every join attempt. On
    /// `UnknownStream` the connection is never added to any room; the caller
    /// must close it.
    pub async fn execute(
        &self,
        stream_key: &StreamKey,
        connection_id: ConnectionId,
        channel: OutboundChannel,
    ) -> Result<(), JoinChatError> {
        if !self.directory.exists(stream_key).await {
            return Err(JoinChatError::UnknownStream(
                stream_key.as_str().to_string(),
            ));
        }

        self.hub.register(stream_key, connection_id, channel).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockStreamDirectory;
    use std::collections::HashMap;
    use tokio::sync::{Mutex, mpsc};

    fn create_test_hub() -> Arc<ChatHub> {
        Arc::new(ChatHub::new(Arc::new(Mutex::new(HashMap::new()))))
    }

    #[tokio::test]
    async fn test_join_with_known_key_registers_connection() {
        // given: the directory resolves the key
        let mut directory = MockStreamDirectory::new();
        directory.expect_exists().return_const(true);
        let hub = create_test_hub();
        let usecase = JoinStreamChatUseCase::new(Arc::new(directory), hub.clone());

        let key = StreamKey::new("abc123");
        let (tx, _rx) = mpsc::unbounded_channel();

        // when:
        let result = usecase.execute(&key, ConnectionId::generate(), tx).await;

        // then: membership increased by exactly one
        assert!(result.is_ok());
        assert_eq!(hub.member_count(&key).await, 1);
    }

    #[tokio::test]
    async fn test_join_with_unknown_key_never_touches_any_room() {
        // given: the directory does not resolve the key
        let mut directory = MockStreamDirectory::new();
        directory.expect_exists().return_const(false);
        let hub = create_test_hub();
        let usecase = JoinStreamChatUseCase::new(Arc::new(directory), hub.clone());

        let key = StreamKey::new("ghost");
        let (tx, _rx) = mpsc::unbounded_channel();

        // when:
        let result = usecase.execute(&key, ConnectionId::generate(), tx).await;

        // then:
        assert_eq!(
            result,
            Err(JoinChatError::UnknownStream("ghost".to_string()))
        );
        assert!(!hub.has_room(&key).await);
        assert_eq!(hub.rooms_snapshot().await.len(), 0);
    }

    #[tokio::test]
    async fn test_directory_is_consulted_once_per_join() {
        // given:
        let mut directory = MockStreamDirectory::new();
        directory.expect_exists().times(2).return_const(true);
        let hub = create_test_hub();
        let usecase = JoinStreamChatUseCase::new(Arc::new(directory), hub.clone());

        let key = StreamKey::new("abc123");
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when: two join attempts, two lookups
        usecase
            .execute(&key, ConnectionId::generate(), tx1)
            .await
            .unwrap();
        usecase
            .execute(&key, ConnectionId::generate(), tx2)
            .await
            .unwrap();

        // then:
        assert_eq!(hub.member_count(&key).await, 2);
    }
}
