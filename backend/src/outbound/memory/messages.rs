//! `MessageRepository` over the message arena.

use async_trait::async_trait;

use crate::domain::ports::{MessageRepository, MessageRepositoryError};
use crate::domain::{Message, MessageId, NewMessage, UserId};

use super::{InMemoryStore, sort_newest_first};

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: NewMessage) -> Result<Message, MessageRepositoryError> {
        Ok(self.messages.write().await.insert_with(|id| Message {
            id: MessageId::new(id),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            is_read: false,
            created_at: message.created_at,
        }))
    }

    async fn find_by_id(&self, id: MessageId) -> Result<Option<Message>, MessageRepositoryError> {
        Ok(self.messages.read().await.get(id.get()))
    }

    async fn list_for_user(&self, user: UserId) -> Result<Vec<Message>, MessageRepositoryError> {
        let mut messages = self
            .messages
            .read()
            .await
            .select(|message| message.sender_id == user || message.receiver_id == user);
        sort_newest_first(&mut messages, |message| (message.created_at, message.id.get()));
        Ok(messages)
    }

    async fn list_between(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<Message>, MessageRepositoryError> {
        let mut messages = self.messages.read().await.select(|message| {
            (message.sender_id == a && message.receiver_id == b)
                || (message.sender_id == b && message.receiver_id == a)
        });
        messages.sort_by_key(|message| (message.created_at, message.id));
        Ok(messages)
    }

    async fn mark_read(&self, id: MessageId) -> Result<Option<Message>, MessageRepositoryError> {
        Ok(self
            .messages
            .write()
            .await
            .replace_with(id.get(), |message| message.is_read = true))
    }
}
