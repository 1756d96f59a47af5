//! Session Store
//!
//! Owns chats, the active chat, the user profile and preferences.
//! Cloning the store hands out another view of the same state.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use parley_chat::{Chat, Message};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::event::{Notification, StoreEvent};
use crate::profile::{Preferences, PreferencesUpdate, UserProfile, UserProfileUpdate};
use crate::reply::{PendingReply, ReplyWorker};
use crate::responder::{EchoResponder, Responder};
use crate::state::SessionState;
use crate::Result;

const EVENT_CAPACITY: usize = 256;

pub struct SessionStore {
    /// All mutable state behind one lock
    state: Arc<RwLock<SessionState>>,
    config: Arc<SessionConfig>,
    events: broadcast::Sender<StoreEvent>,
    /// Queue drained by the reply worker
    replies: mpsc::UnboundedSender<PendingReply>,
}

impl SessionStore {
    /// Create a store replying with [`EchoResponder`].
    ///
    /// Must be called from within a Tokio runtime: the reply worker is
    /// spawned onto the current one.
    pub fn start(config: SessionConfig) -> Result<Self> {
        Self::start_with_responder(config, Arc::new(EchoResponder))
    }

    pub fn start_with_responder(
        config: SessionConfig,
        responder: Arc<dyn Responder>,
    ) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let state = Arc::new(RwLock::new(SessionState::new(&config)));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (replies, queue) = mpsc::unbounded_channel();

        ReplyWorker::new(queue, Arc::downgrade(&state), events.clone(), responder)
            .spawn(&handle);

        let store = Self {
            state,
            config: Arc::new(config),
            events,
            replies,
        };

        tracing::info!(
            chat_count = store.state.read().chats.len(),
            reply_delay_ms = store.config.reply_delay.as_millis() as u64,
            "Started session store"
        );

        Ok(store)
    }

    /// Listen for store changes
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // === Chat operations ===

    /// Create a new chat at the front of the list and make it active
    pub fn create_chat(&self) -> Chat {
        let mut state = self.state.write();
        let chat = state.create_chat(&self.config.new_chat_title, &self.config.new_chat_greeting);

        tracing::info!(chat_id = %chat.id(), title = %chat.title(), "Created new chat");

        self.emit(StoreEvent::ChatCreated {
            chat_id: chat.id().to_string(),
        });
        self.emit(StoreEvent::ActiveChatChanged {
            chat_id: Some(chat.id().to_string()),
        });

        chat
    }

    /// Make the chat with the given id active. Unknown ids are ignored.
    pub fn select_chat(&self, chat_id: &str) -> Option<Chat> {
        let mut state = self.state.write();
        let selected = state.select_chat(chat_id);

        match &selected {
            Some(chat) => {
                tracing::debug!(chat_id = %chat.id(), "Selected chat");
                self.emit(StoreEvent::ActiveChatChanged {
                    chat_id: Some(chat.id().to_string()),
                });
            }
            None => tracing::debug!(chat_id = %chat_id, "Ignoring selection of unknown chat"),
        }

        selected
    }

    /// Delete a chat, returning it. Unknown ids are ignored.
    ///
    /// Deleting the active chat activates the new first chat, or clears the
    /// selection when no chats remain.
    pub fn delete_chat(&self, chat_id: &str) -> Option<Chat> {
        let mut state = self.state.write();
        let deletion = state.delete_chat(chat_id)?;
        let title = deletion.chat.title().to_string();

        tracing::info!(chat_id = %chat_id, title = %title, "Deleted chat");

        self.emit(StoreEvent::ChatDeleted {
            chat_id: chat_id.to_string(),
            title: title.clone(),
        });
        if let Some(active) = deletion.reassigned {
            self.emit(StoreEvent::ActiveChatChanged { chat_id: active });
        }
        self.emit(StoreEvent::Notification(Notification::new(
            "Chat deleted",
            format!("\"{title}\" has been deleted"),
        )));

        Some(deletion.chat)
    }

    /// Send a user message to the active chat.
    ///
    /// The user message is visible immediately. The assistant reply is
    /// appended after the configured delay to the same chat, looked up by
    /// id, and dropped if that chat has been deleted by then. Returns `None`
    /// without changing anything when there is no active chat or the text
    /// is blank.
    ///
    /// The reply is queued while the write lock is held, so queue order is
    /// commit order even when several handles send at once.
    pub fn send_message(&self, text: &str) -> Option<Message> {
        let mut state = self.state.write();
        let (chat_id, message) = state.append_user_message(text)?;

        tracing::debug!(chat_id = %chat_id, message_id = %message.id, "Sent user message");

        self.emit(StoreEvent::MessageAppended {
            chat_id: chat_id.clone(),
            message: message.clone(),
        });

        let pending = PendingReply {
            chat_id,
            prompt: text.to_string(),
            due: Instant::now() + self.config.reply_delay,
        };
        if let Err(e) = self.replies.send(pending) {
            tracing::warn!(chat_id = %e.0.chat_id, "Reply worker unavailable");
        }

        Some(message)
    }

    // === Profile and preferences ===

    pub fn update_user_profile(&self, update: UserProfileUpdate) -> UserProfile {
        let mut state = self.state.write();
        state.profile.apply(update);
        let profile = state.profile.clone();

        tracing::info!(user_id = %profile.id, "Updated user profile");

        self.emit(StoreEvent::ProfileUpdated(profile.clone()));
        self.emit(StoreEvent::Notification(Notification::new(
            "Profile updated",
            "Your profile has been updated successfully",
        )));

        profile
    }

    pub fn update_preferences(&self, update: PreferencesUpdate) -> Preferences {
        let mut state = self.state.write();
        state.preferences.apply(update);
        let preferences = state.preferences.clone();

        tracing::info!(
            dark_mode = preferences.dark_mode,
            font_size = %preferences.font_size,
            "Updated preferences"
        );

        self.emit(StoreEvent::PreferencesUpdated(preferences.clone()));
        self.emit(StoreEvent::Notification(Notification::new(
            "Preferences saved",
            "Your preferences have been updated",
        )));

        preferences
    }

    // === Snapshots ===

    /// All chats, most recent first
    pub fn chats(&self) -> Vec<Chat> {
        self.state.read().chats.to_vec()
    }

    pub fn chat(&self, chat_id: &str) -> Option<Chat> {
        self.state.read().chats.get(chat_id).cloned()
    }

    pub fn active_chat(&self) -> Option<Chat> {
        self.state.read().active_chat().cloned()
    }

    pub fn active_chat_id(&self) -> Option<String> {
        self.state.read().active_chat_id.clone()
    }

    /// Chats whose title contains `query` (case-insensitive), in list order
    pub fn search_chats(&self, query: &str) -> Vec<Chat> {
        self.state
            .read()
            .chats
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn profile(&self) -> UserProfile {
        self.state.read().profile.clone()
    }

    pub fn preferences(&self) -> Preferences {
        self.state.read().preferences.clone()
    }

    /// Callers hold the state write lock, so events go out in commit order
    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: Arc::clone(&self.config),
            events: self.events.clone(),
            replies: self.replies.clone(),
        }
    }
}
