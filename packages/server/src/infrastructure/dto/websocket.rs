//! WebSocket wire types for the chat protocol.

use serde::{Deserialize, Serialize};

/// Message type marker carried by every outbound chat payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Message,
}

/// Client -> server chat payload.
///
/// Tolerant by design: missing fields default, unknown fields are ignored,
/// and the sender gets no acknowledgement either way.
#[derive(Debug, Deserialize)]
pub struct InboundChatMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Server -> room chat payload, one per broadcast
#[derive(Debug, Clone, Serialize)]
pub struct OutboundChatMessage {
    pub r#type: MessageType,
    pub text: String,
    pub username: String,
    /// `null` on the wire when the client asserted no avatar
    pub avatar: Option<String>,
    /// Server-stamped send time, RFC 3339 in UTC
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_parses_full_payload() {
        // given:
        let raw = r#"{"text":"hello","username":"alice","avatar":"https://cdn.example/a.png"}"#;

        // when:
        let msg: InboundChatMessage = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.username.as_deref(), Some("alice"));
        assert_eq!(msg.avatar.as_deref(), Some("https://cdn.example/a.png"));
    }

    #[test]
    fn test_inbound_defaults_missing_fields() {
        // given:
        let raw = r#"{"text":"hello"}"#;

        // when:
        let msg: InboundChatMessage = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.username, None);
        assert_eq!(msg.avatar, None);
    }

    #[test]
    fn test_inbound_tolerates_unknown_fields_and_null_avatar() {
        // given:
        let raw = r#"{"text":"hi","avatar":null,"color":"red","badges":[1,2]}"#;

        // when:
        let msg: InboundChatMessage = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(msg.text, "hi");
        assert_eq!(msg.avatar, None);
    }

    #[test]
    fn test_inbound_rejects_malformed_json() {
        // given / when / then:
        assert!(serde_json::from_str::<InboundChatMessage>("not json").is_err());
        assert!(serde_json::from_str::<InboundChatMessage>(r#"{"text":123}"#).is_err());
    }

    #[test]
    fn test_outbound_serializes_expected_shape() {
        // given:
        let msg = OutboundChatMessage {
            r#type: MessageType::Message,
            text: "hello".to_string(),
            username: "alice".to_string(),
            avatar: None,
            timestamp: "2023-11-14T22:13:20+00:00".to_string(),
        };

        // when:
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        // then:
        assert_eq!(
            json,
            serde_json::json!({
                "type": "message",
                "text": "hello",
                "username": "alice",
                "avatar": null,
                "timestamp": "2023-11-14T22:13:20+00:00",
            })
        );
    }
}
