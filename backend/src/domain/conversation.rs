//! Conversation summaries folded from a flat message log.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Message, MessageId, UserId, UserSummary};

/// One row of a user's inbox: the latest exchange with a counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    /// The counterpart's id.
    pub user_id: UserId,
    pub last_message: String,
    pub last_message_date: DateTime<Utc>,
    /// Incoming unread messages across the whole history with the counterpart.
    pub unread_count: u32,
    /// Counterpart's public summary, when the user still exists.
    pub user: Option<UserSummary>,
    #[serde(skip)]
    last_message_id: MessageId,
}

impl ConversationSummary {
    fn start(counterpart: UserId, message: &Message) -> Self {
        Self {
            user_id: counterpart,
            last_message: message.content.as_ref().to_owned(),
            last_message_date: message.created_at,
            unread_count: 0,
            user: None,
            last_message_id: message.id,
        }
    }

    fn is_older_than(&self, message: &Message) -> bool {
        (message.created_at, message.id) > (self.last_message_date, self.last_message_id)
    }

    fn absorb(&mut self, message: &Message) {
        self.last_message = message.content.as_ref().to_owned();
        self.last_message_date = message.created_at;
        self.last_message_id = message.id;
    }
}

/// Fold `messages` into one summary per counterpart of `user_id`.
///
/// Single pass: for each counterpart keep the newest message (timestamp, then
/// id) as the last message and count every incoming unread message
/// separately. Messages not involving `user_id` are ignored. The result is
/// ordered by last message date, newest first.
pub fn summarise_conversations(
    user_id: UserId,
    messages: &[Message],
) -> Vec<ConversationSummary> {
    let mut by_counterpart: HashMap<UserId, ConversationSummary> = HashMap::new();

    for message in messages {
        if message.sender_id != user_id && message.receiver_id != user_id {
            continue;
        }
        let counterpart = message.counterpart_of(user_id);
        let summary = by_counterpart
            .entry(counterpart)
            .or_insert_with(|| ConversationSummary::start(counterpart, message));
        if summary.is_older_than(message) {
            summary.absorb(message);
        }
        if message.is_unread_for(user_id) {
            summary.unread_count += 1;
        }
    }

    let mut summaries: Vec<_> = by_counterpart.into_values().collect();
    summaries.sort_by(|a, b| {
        b.last_message_date
            .cmp(&a.last_message_date)
            .then_with(|| b.last_message_id.cmp(&a.last_message_id))
    });
    summaries
}

/// An opened conversation: every message in both directions, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationThread {
    pub counterpart: UserSummary,
    pub messages: Vec<Message>,
}
