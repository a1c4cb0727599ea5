//! Driving port for the conversation inbox.

use async_trait::async_trait;

use crate::domain::{Caller, ConversationSummary, Error};

/// Driving port for messaging read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingQuery: Send + Sync {
    /// One summary per counterpart, most recent conversation first.
    async fn list_conversations(&self, caller: Caller) -> Result<Vec<ConversationSummary>, Error>;
}
