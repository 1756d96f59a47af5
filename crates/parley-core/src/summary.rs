//! Chat list rows as the sidebar renders them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parley_chat::{format_relative, Chat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: String,
    pub title: String,
    /// Last message text, or a placeholder for empty chats
    pub preview: String,
    pub last_updated: String,
    pub is_active: bool,
}

impl ChatSummary {
    pub fn new(chat: &Chat, active_chat_id: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            id: chat.id().to_string(),
            title: chat.title().to_string(),
            preview: chat.preview().to_string(),
            last_updated: format_relative(&chat.last_updated(), &now),
            is_active: active_chat_id == Some(chat.id()),
        }
    }
}
