//! Direct messaging and the conversation inbox.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    MessageRepository, MessagingCommand, MessagingQuery, OpenConversationRequest,
    SendMessageRequest, UserRepository,
};
use crate::domain::service_support::{
    lookup_summary, map_message_repository_error, map_user_repository_error, validation_error,
};
use crate::domain::{
    Caller, ConversationSummary, ConversationThread, Error, Message, MessageContent, NewMessage,
    User, UserId, summarise_conversations,
};

/// Messaging service implementing the messaging command and query ports.
#[derive(Clone)]
pub struct MessagingService<U, M> {
    user_repo: Arc<U>,
    message_repo: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<U, M> MessagingService<U, M> {
    /// Create a new messaging service.
    pub fn new(user_repo: Arc<U>, message_repo: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            message_repo,
            clock,
        }
    }
}

impl<U, M> MessagingService<U, M>
where
    U: UserRepository,
    M: MessageRepository,
{
    async fn find_user(&self, user_id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    async fn thread(&self, a: UserId, b: UserId) -> Result<Vec<Message>, Error> {
        self.message_repo
            .list_between(a, b)
            .await
            .map_err(map_message_repository_error)
    }
}

#[async_trait]
impl<U, M> MessagingCommand for MessagingService<U, M>
where
    U: UserRepository,
    M: MessageRepository,
{
    async fn send_message(&self, request: SendMessageRequest) -> Result<Message, Error> {
        let sender = request.caller.require()?;
        let content =
            MessageContent::new(request.content).map_err(|err| validation_error(err, "content"))?;
        self.find_user(request.receiver_id).await?;

        let message = self
            .message_repo
            .create(NewMessage {
                sender_id: sender,
                receiver_id: request.receiver_id,
                content,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_message_repository_error)?;
        info!(message_id = %message.id, sender = %sender, receiver = %message.receiver_id, "message sent");
        Ok(message)
    }

    async fn open_conversation(
        &self,
        request: OpenConversationRequest,
    ) -> Result<ConversationThread, Error> {
        let reader = request.caller.require()?;
        let counterpart = self.find_user(request.counterpart_id).await?;

        let unread: Vec<_> = self
            .thread(reader, counterpart.id)
            .await?
            .into_iter()
            .filter(|message| message.is_unread_for(reader))
            .map(|message| message.id)
            .collect();
        for message_id in &unread {
            self.message_repo
                .mark_read(*message_id)
                .await
                .map_err(map_message_repository_error)?;
        }
        if !unread.is_empty() {
            debug!(reader = %reader, counterpart = %counterpart.id, marked = unread.len(), "messages marked read");
        }

        let messages = self.thread(reader, counterpart.id).await?;
        Ok(ConversationThread {
            counterpart: counterpart.summary(),
            messages,
        })
    }
}

#[async_trait]
impl<U, M> MessagingQuery for MessagingService<U, M>
where
    U: UserRepository,
    M: MessageRepository,
{
    async fn list_conversations(&self, caller: Caller) -> Result<Vec<ConversationSummary>, Error> {
        let user_id = caller.require()?;
        let messages = self
            .message_repo
            .list_for_user(user_id)
            .await
            .map_err(map_message_repository_error)?;

        let mut summaries = summarise_conversations(user_id, &messages);
        for summary in &mut summaries {
            summary.user = lookup_summary(self.user_repo.as_ref(), summary.user_id).await?;
        }
        Ok(summaries)
    }
}

#[cfg(test)]
#[path = "messaging_service_tests.rs"]
mod tests;
