//! Chat data structure
//!
//! The sidebar shows for each chat:
//! - Title
//! - Relative last-updated time
//! - Preview of the last message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Message, Sender};

const EMPTY_PREVIEW: &str = "No messages yet";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    id: String,
    title: String,
    /// Append order is display order
    messages: Vec<Message>,
    last_updated: DateTime<Utc>,
}

impl Chat {
    /// Create a chat seeded with one assistant greeting
    pub fn new(title: impl Into<String>, greeting: impl Into<String>) -> Self {
        Self::started_at(title, greeting, Utc::now())
    }

    /// Create a seeded chat whose greeting (and last update) happened at `at`
    pub fn started_at(
        title: impl Into<String>,
        greeting: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("chat-{}", Uuid::new_v4()),
            title: title.into(),
            messages: vec![Message::at(greeting, Sender::Assistant, at)],
            last_updated: at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append a message and bump the last-updated time
    pub fn push(&mut self, message: Message) {
        tracing::debug!(
            chat_id = %self.id,
            message_id = %message.id,
            sender = %message.sender,
            "Appending message"
        );

        self.last_updated = message.timestamp;
        self.messages.push(message);
    }

    /// Text shown under the title in the chat list
    pub fn preview(&self) -> &str {
        self.last_message()
            .map(|m| m.text.as_str())
            .unwrap_or(EMPTY_PREVIEW)
    }

    /// Case-insensitive title match. An empty query matches everything.
    pub fn title_matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.title.to_lowercase().contains(&query.to_lowercase())
    }
}
