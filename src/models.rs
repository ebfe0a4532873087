// Data structures (Message, MessageLog, request/response bodies)

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Maximum number of messages retained by the board.
pub const MAX_MESSAGES: usize = 5;

/// Nickname stored when the client omits one or sends a blank value.
pub const DEFAULT_NICKNAME: &str = "Untitled";

fn default_nickname() -> String {
    DEFAULT_NICKNAME.to_string()
}

// `null` counts as an empty log, same as a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Message>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// Message Struct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(default = "default_nickname")]
    pub nickname: String,
    pub message: String,
    /// ISO-8601 creation time, kept exactly as stored. Absent only on entries
    /// written before timestamps were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Bounded, insertion-ordered list of messages.
///
/// Serializes as `{ "messages": [...] }`, which is both the storage document
/// and the response body of both endpoints. A document without a `messages`
/// field, or with `"messages": null`, deserializes to an empty log.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageLog {
    #[serde(default, deserialize_with = "null_as_empty")]
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append a message, evicting the oldest entries so the log never holds
    /// more than [`MAX_MESSAGES`]. Returns the number of evicted entries.
    pub fn push(&mut self, message: Message) -> usize {
        let excess = (self.messages.len() + 1).saturating_sub(MAX_MESSAGES);
        self.messages.drain(..excess);
        self.messages.push(message);
        excess
    }
}

impl From<Vec<Message>> for MessageLog {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

// Request Types

/// Raw body of `POST /messages`.
///
/// Fields are kept as untyped JSON so that wrong types surface as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddMessageRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub nickname: Option<Value>,
}

impl AddMessageRequest {
    /// Decode a request body. Anything that is not a JSON object is treated as
    /// an invalid message.
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        match serde_json::from_slice(body) {
            Ok(Value::Object(fields)) => serde_json::from_value(Value::Object(fields))
                .map_err(|_| ApiError::InvalidMessage),
            _ => Err(ApiError::InvalidMessage),
        }
    }

    pub fn validate(self) -> Result<NewMessage, ApiError> {
        let message = match self.message {
            Some(Value::String(text)) if !text.is_empty() => text,
            _ => return Err(ApiError::InvalidMessage),
        };

        let nickname = match self.nickname {
            Some(Value::String(name)) if !name.trim().is_empty() => name,
            _ => default_nickname(),
        };

        Ok(NewMessage { nickname, message })
    }
}

/// A validated message that has not been timestamped yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub nickname: String,
    pub message: String,
}

impl NewMessage {
    /// Attach `timestamp`, formatted as UTC with millisecond precision
    /// (`2024-01-01T00:00:00.000Z`).
    pub fn stamp(self, timestamp: DateTime<Utc>) -> Message {
        Message {
            nickname: self.nickname,
            message: self.message,
            timestamp: Some(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

// Response Types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(text: &str) -> Message {
        Message {
            nickname: "tester".to_string(),
            message: text.to_string(),
            timestamp: Some("2024-01-01T00:00:00.000Z".to_string()),
        }
    }

    fn request(value: Value) -> AddMessageRequest {
        AddMessageRequest::from_slice(value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut log = MessageLog::new();
        assert_eq!(log.push(message("a")), 0);
        assert_eq!(log.push(message("b")), 0);

        let texts: Vec<_> = log.messages().iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_push_evicts_oldest_at_capacity() {
        let mut log = MessageLog::new();
        for i in 0..MAX_MESSAGES {
            log.push(message(&format!("m{}", i)));
        }

        let evicted = log.push(message("newest"));

        assert_eq!(evicted, 1);
        assert_eq!(log.len(), MAX_MESSAGES);
        assert_eq!(log.messages()[0].message, "m1");
        assert_eq!(log.last().unwrap().message, "newest");
    }

    #[test]
    fn test_push_trims_oversized_log() {
        let oversized: Vec<_> = (0..8).map(|i| message(&format!("m{}", i))).collect();
        let mut log = MessageLog::from(oversized);

        let evicted = log.push(message("newest"));

        assert_eq!(evicted, 4);
        assert_eq!(log.len(), MAX_MESSAGES);
        assert_eq!(log.messages()[0].message, "m4");
    }

    #[test]
    fn test_log_serializes_under_messages_key() {
        let log = MessageLog::from(vec![message("hello")]);
        let value = serde_json::to_value(&log).unwrap();

        assert_eq!(value["messages"][0]["message"], "hello");
        assert_eq!(value["messages"][0]["nickname"], "tester");
        assert!(value["messages"][0]["timestamp"].is_string());
    }

    #[test]
    fn test_log_without_messages_field_is_empty() {
        let log: MessageLog = serde_json::from_str("{}").unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_legacy_entry_without_timestamp_or_nickname() {
        let log: MessageLog =
            serde_json::from_value(json!({ "messages": [{ "message": "old" }] })).unwrap();

        let entry = &log.messages()[0];
        assert_eq!(entry.nickname, DEFAULT_NICKNAME);
        assert!(entry.timestamp.is_none());

        let value = serde_json::to_value(&log).unwrap();
        assert!(value["messages"][0].get("timestamp").is_none());
    }

    #[test]
    fn test_log_with_null_messages_is_empty() {
        let log: MessageLog = serde_json::from_str(r#"{ "messages": null }"#).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_stamped_timestamp_is_iso8601() {
        let new = NewMessage {
            nickname: "bob".to_string(),
            message: "hi".to_string(),
        };
        let value = serde_json::to_value(new.stamp(Utc::now())).unwrap();
        let raw = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(raw).is_ok());
        assert!(raw.ends_with('Z'));
    }

    #[test]
    fn test_legacy_timestamps_kept_verbatim() {
        for raw in ["2024-01-01", "2024-01-01T00:00:00.000Z", "2024-01-01T01:00:00+01:00"] {
            let log: MessageLog = serde_json::from_value(json!({
                "messages": [{ "nickname": "ann", "message": "old", "timestamp": raw }]
            }))
            .unwrap();

            assert_eq!(log.messages()[0].timestamp.as_deref(), Some(raw));
            let value = serde_json::to_value(&log).unwrap();
            assert_eq!(value["messages"][0]["timestamp"], raw);
        }
    }

    #[test]
    fn test_validate_accepts_message_and_nickname() {
        let new = request(json!({ "message": "hi", "nickname": "bob" }))
            .validate()
            .unwrap();
        assert_eq!(new.message, "hi");
        assert_eq!(new.nickname, "bob");
    }

    #[test]
    fn test_validate_defaults_nickname() {
        let cases = vec![
            json!({ "message": "hi" }),
            json!({ "message": "hi", "nickname": "" }),
            json!({ "message": "hi", "nickname": "   " }),
            json!({ "message": "hi", "nickname": 42 }),
            json!({ "message": "hi", "nickname": null }),
        ];

        for body in cases {
            let new = request(body.clone()).validate().unwrap();
            assert_eq!(new.nickname, DEFAULT_NICKNAME, "body: {}", body);
        }
    }

    #[test]
    fn test_validate_rejects_bad_message() {
        let cases = vec![
            json!({}),
            json!({ "nickname": "bob" }),
            json!({ "message": "" }),
            json!({ "message": 7 }),
            json!({ "message": ["hi"] }),
            json!({ "message": null }),
        ];

        for body in cases {
            let result = request(body.clone()).validate();
            assert!(
                matches!(result, Err(ApiError::InvalidMessage)),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_from_slice_rejects_non_objects() {
        let bodies: [&[u8]; 5] = [b"not json", b"\"hi\"", b"[\"hi\"]", b"null", b""];
        for body in bodies {
            assert!(matches!(
                AddMessageRequest::from_slice(body),
                Err(ApiError::InvalidMessage)
            ));
        }
    }

    #[test]
    fn test_stamp_sets_timestamp() {
        let now = DateTime::parse_from_rfc3339("2024-05-06T07:08:09.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        let new = NewMessage {
            nickname: "bob".to_string(),
            message: "hi".to_string(),
        };
        let stamped = new.stamp(now);
        assert_eq!(stamped.timestamp.as_deref(), Some("2024-05-06T07:08:09.123Z"));
        assert_eq!(stamped.nickname, "bob");
    }
}
