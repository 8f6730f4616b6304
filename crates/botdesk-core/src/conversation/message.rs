//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Process-unique, monotonically increasing message identifier.
pub type MessageId = u64;

/// Who authored a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum MessageSender {
    /// The person using the dashboard.
    User,
    /// One of the registered assistants, by id.
    Assistant(String),
}

impl MessageSender {
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }
}

/// A single message in a conversation history.
///
/// Messages are immutable once created. The text never contains a
/// control sentinel; it is stripped before the message is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: MessageSender,
    pub text: String,
    /// Timestamp when the message was created (RFC 3339).
    pub timestamp: String,
}

impl Message {
    pub fn new(id: MessageId, sender: MessageSender, text: impl Into<String>) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn from_user(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, MessageSender::User, text)
    }

    pub fn from_assistant(id: MessageId, assistant_id: &str, text: impl Into<String>) -> Self {
        Self::new(id, MessageSender::Assistant(assistant_id.to_string()), text)
    }
}
