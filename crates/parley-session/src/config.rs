//! Session store configuration

use std::time::Duration;

use crate::profile::{Preferences, UserProfile};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long the assistant "thinks" before its reply is appended
    pub reply_delay: Duration,
    /// Title given to chats created with `create_chat`
    pub new_chat_title: String,
    /// Assistant greeting seeded into every new chat
    pub new_chat_greeting: String,
    /// Start with the "Getting Started" and "Project Ideas" chats
    pub seed_chats: bool,
    pub profile: UserProfile,
    pub preferences: Preferences,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            new_chat_title: "New Conversation".to_string(),
            new_chat_greeting: "How can I assist you today?".to_string(),
            seed_chats: true,
            profile: UserProfile::default(),
            preferences: Preferences::default(),
        }
    }
}
