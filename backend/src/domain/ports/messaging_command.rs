//! Driving port for messaging mutations.

use async_trait::async_trait;

use crate::domain::{Caller, ConversationThread, Error, Message, UserId};

/// Send a direct message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub caller: Caller,
    pub receiver_id: UserId,
    pub content: String,
}

/// Open the conversation with one counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenConversationRequest {
    pub caller: Caller,
    pub counterpart_id: UserId,
}

/// Driving port for messaging write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingCommand: Send + Sync {
    /// Store an unread message from the caller.
    async fn send_message(&self, request: SendMessageRequest) -> Result<Message, Error>;

    /// Mark the caller's incoming messages from the counterpart read and
    /// return the whole thread, oldest first.
    ///
    /// Opening a conversation twice changes nothing the second time.
    async fn open_conversation(
        &self,
        request: OpenConversationRequest,
    ) -> Result<ConversationThread, Error>;
}
