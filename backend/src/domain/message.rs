//! Direct messages between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MessageId, UserId};

/// Validation errors for message input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageValidationError {
    #[error("message content must not be empty")]
    EmptyContent,
}

/// Non-empty message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageContent(String);

impl MessageContent {
    /// Validate message content. Surrounding whitespace is kept; only blank
    /// bodies are rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, MessageValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(MessageValidationError::EmptyContent);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for MessageContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MessageContent> for String {
    fn from(value: MessageContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = MessageValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored message.
///
/// `is_read` only ever flips from `false` to `true`, when the receiver opens
/// the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: MessageContent,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// The other participant from `user_id`'s point of view.
    pub fn counterpart_of(&self, user_id: UserId) -> UserId {
        if self.receiver_id == user_id {
            self.sender_id
        } else {
            self.receiver_id
        }
    }

    /// Whether `user_id` received this message and has not read it.
    pub fn is_unread_for(&self, user_id: UserId) -> bool {
        self.receiver_id == user_id && !self.is_read
    }
}

/// Message ready for insertion; always starts unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}
