//! Conversion logic between DTOs and domain entities.

use xatube_shared::time::timestamp_to_utc_rfc3339;

use crate::domain::ChatMessage;
use crate::infrastructure::dto::websocket as dto;

// Domain entity -> wire DTO. The inbound direction goes through
// `ChatMessage::compose` instead of `From`, because it can drop the payload.
impl From<ChatMessage> for dto::OutboundChatMessage {
    fn from(model: ChatMessage) -> Self {
        Self {
            r#type: dto::MessageType::Message,
            text: model.text.into_string(),
            username: model.username.into_string(),
            avatar: model.avatar,
            timestamp: timestamp_to_utc_rfc3339(model.timestamp.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    #[test]
    fn test_domain_chat_message_to_outbound_dto() {
        // given: 2023-11-14T22:13:20Z
        let message = ChatMessage::compose(
            "hello",
            Some("alice".to_string()),
            None,
            Timestamp::new(1_700_000_000_000),
        )
        .unwrap();

        // when:
        let outbound = dto::OutboundChatMessage::from(message);

        // then:
        assert_eq!(outbound.r#type, dto::MessageType::Message);
        assert_eq!(outbound.text, "hello");
        assert_eq!(outbound.username, "alice");
        assert_eq!(outbound.avatar, None);
        assert_eq!(outbound.timestamp, "2023-11-14T22:13:20+00:00");
    }
}
