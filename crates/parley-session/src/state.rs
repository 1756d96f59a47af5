//! Session state transitions
//!
//! Every method here is one atomic step; the store applies them under a
//! single write lock. The active chat id, when set, always names a chat in
//! `chats`.

use chrono::{Duration, Utc};
use parley_chat::{Chat, ChatList, Message};

use crate::config::SessionConfig;
use crate::profile::{Preferences, UserProfile};

const GETTING_STARTED_GREETING: &str =
    "Hi there! I'm your AI assistant. How can I help you today?";
const PROJECT_IDEAS_GREETING: &str = "Let's brainstorm some project ideas for your portfolio.";

#[derive(Debug, Clone)]
pub(crate) struct SessionState {
    pub(crate) chats: ChatList,
    pub(crate) active_chat_id: Option<String>,
    pub(crate) profile: UserProfile,
    pub(crate) preferences: Preferences,
}

/// Outcome of removing a chat
#[derive(Debug, Clone)]
pub(crate) struct Deletion {
    pub(crate) chat: Chat,
    /// Set when the deleted chat was active
    pub(crate) reassigned: Option<Option<String>>,
}

impl SessionState {
    pub(crate) fn new(config: &SessionConfig) -> Self {
        let mut state = Self {
            chats: ChatList::new(),
            active_chat_id: None,
            profile: config.profile.clone(),
            preferences: config.preferences.clone(),
        };

        if config.seed_chats {
            state.seed();
        }

        state
    }

    fn seed(&mut self) {
        let now = Utc::now();
        let project_ideas =
            Chat::started_at("Project Ideas", PROJECT_IDEAS_GREETING, now - Duration::hours(1));
        let getting_started = Chat::started_at("Getting Started", GETTING_STARTED_GREETING, now);
        let active_id = getting_started.id().to_string();

        // Fresh ids cannot collide
        let _ = self.chats.prepend(project_ideas);
        let _ = self.chats.prepend(getting_started);
        self.active_chat_id = Some(active_id);
    }

    pub(crate) fn active_chat(&self) -> Option<&Chat> {
        self.active_chat_id
            .as_deref()
            .and_then(|id| self.chats.get(id))
    }

    /// Prepend a freshly seeded chat and make it active
    pub(crate) fn create_chat(&mut self, title: &str, greeting: &str) -> Chat {
        let mut chat = Chat::new(title, greeting);
        while self.chats.contains(chat.id()) {
            chat = Chat::new(title, greeting);
        }

        let id = chat.id().to_string();
        let _ = self.chats.prepend(chat.clone());
        self.active_chat_id = Some(id);
        chat
    }

    pub(crate) fn select_chat(&mut self, chat_id: &str) -> Option<Chat> {
        let chat = self.chats.get(chat_id)?.clone();
        self.active_chat_id = Some(chat.id().to_string());
        Some(chat)
    }

    pub(crate) fn delete_chat(&mut self, chat_id: &str) -> Option<Deletion> {
        let chat = self.chats.remove(chat_id)?;

        let reassigned = if self.active_chat_id.as_deref() == Some(chat_id) {
            let next = self.chats.first().map(|c| c.id().to_string());
            self.active_chat_id = next.clone();
            Some(next)
        } else {
            None
        };

        Some(Deletion { chat, reassigned })
    }

    /// Append a user message to the active chat.
    ///
    /// Returns the target chat id and the stored message, or `None` when
    /// there is no active chat or the text is blank.
    pub(crate) fn append_user_message(&mut self, text: &str) -> Option<(String, Message)> {
        if text.trim().is_empty() {
            return None;
        }

        let chat_id = self.active_chat_id.clone()?;
        let message = Message::user(text);
        self.chats.append_message(&chat_id, message.clone()).ok()?;

        Some((chat_id, message))
    }

    /// Append an assistant reply to a chat by id. `None` if the chat is gone.
    pub(crate) fn append_reply(&mut self, chat_id: &str, text: &str) -> Option<Message> {
        let message = Message::assistant(text);
        self.chats.append_message(chat_id, message.clone()).ok()?;
        Some(message)
    }
}
