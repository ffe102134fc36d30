//! LINE Messaging API webhook payloads.
//!
//! Only the fields needed to route and correlate message events are modelled;
//! everything else is optional so that follow, unfollow and postback events
//! still deserialize and can be ignored.
//!
//! Reference: <https://developers.line.biz/en/reference/messaging-api/#message-event>

use serde::{Deserialize, Serialize};

/// Body of one webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    /// User ID of the bot that received the events.
    pub destination: String,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub webhook_event_id: Option<String>,
    #[serde(default)]
    pub delivery_context: Option<DeliveryContext>,
    #[serde(default)]
    pub message: Option<EventMessage>,
}

impl WebhookEvent {
    /// The user the event came from, if LINE disclosed one.
    pub fn user_id(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.user_id.as_deref())
    }

    pub fn is_redelivery(&self) -> bool {
        self.delivery_context
            .as_ref()
            .is_some_and(|ctx| ctx.is_redelivery)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    #[serde(default)]
    pub is_redelivery: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub quote_token: Option<String>,
}

/// Message content types. Anything the bot does not handle collapses into
/// `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_EVENT: &str = r#"{
        "destination": "U0bot",
        "events": [{
            "type": "message",
            "replyToken": "reply-1",
            "mode": "active",
            "timestamp": 1720000000000,
            "source": {"type": "user", "userId": "U123"},
            "webhookEventId": "01J000",
            "deliveryContext": {"isRedelivery": false},
            "message": {"id": "m1", "type": "text", "quoteToken": "q", "text": "algebra notes"}
        }]
    }"#;

    #[test]
    fn test_deserialize_text_message_event() {
        let req: WebhookRequest = serde_json::from_str(TEXT_EVENT).unwrap();
        assert_eq!(req.destination, "U0bot");
        assert_eq!(req.events.len(), 1);

        let event = &req.events[0];
        assert_eq!(event.event_type, "message");
        assert_eq!(event.user_id(), Some("U123"));
        assert!(!event.is_redelivery());

        let message = event.message.as_ref().unwrap();
        assert_eq!(message.message_type, MessageType::Text);
        assert_eq!(message.text.as_deref(), Some("algebra notes"));
    }

    #[test]
    fn test_deserialize_verification_ping() {
        let req: WebhookRequest =
            serde_json::from_str(r#"{"destination": "U0bot", "events": []}"#).unwrap();
        assert!(req.events.is_empty());
    }

    #[test]
    fn test_unknown_message_type_maps_to_other() {
        let message: EventMessage =
            serde_json::from_str(r#"{"id": "m2", "type": "sticker", "packageId": "1"}"#).unwrap();
        assert_eq!(message.message_type, MessageType::Other);
    }

    #[test]
    fn test_follow_event_without_message() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"type": "follow", "replyToken": "r", "timestamp": 1, "source": {"type": "user", "userId": "U9"}}"#,
        )
        .unwrap();
        assert!(event.message.is_none());
        assert_eq!(event.user_id(), Some("U9"));
    }
}
