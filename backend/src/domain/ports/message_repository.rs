//! Port abstraction for direct message persistence.
use async_trait::async_trait;

use crate::domain::{Message, MessageId, NewMessage, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by message repository adapters.
    pub enum MessageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "message repository query failed: {message}",
    }
}

/// Port for the message log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append an unread message and assign the next identifier.
    async fn create(&self, message: NewMessage) -> Result<Message, MessageRepositoryError>;

    /// Fetch a message by identifier.
    async fn find_by_id(&self, id: MessageId) -> Result<Option<Message>, MessageRepositoryError>;

    /// Messages `user` sent or received, newest first.
    async fn list_for_user(&self, user: UserId) -> Result<Vec<Message>, MessageRepositoryError>;

    /// Messages exchanged between `a` and `b` in either direction, oldest
    /// first.
    async fn list_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<Message>, MessageRepositoryError>;

    /// Mark a message read. Marking an already read message is a no-op.
    ///
    /// Returns `None` when the message is absent.
    async fn mark_read(&self, id: MessageId) -> Result<Option<Message>, MessageRepositoryError>;
}
