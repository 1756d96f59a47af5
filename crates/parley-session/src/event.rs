//! Events published to the presentation layer

use parley_chat::Message;
use serde::Serialize;

use crate::profile::{Preferences, UserProfile};

/// A short user-visible notice, rendered by the view as a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    ChatCreated { chat_id: String },
    ActiveChatChanged { chat_id: Option<String> },
    ChatDeleted { chat_id: String, title: String },
    MessageAppended { chat_id: String, message: Message },
    /// A deferred reply came due after its chat was deleted
    ReplyDropped { chat_id: String },
    ProfileUpdated(UserProfile),
    PreferencesUpdated(Preferences),
    Notification(Notification),
}
