//! Main application state container
//!
//! Owns the session store and the settings database. Chats live only in
//! memory; the database holds the authentication flag and nothing else.

use chrono::Utc;
use tokio::sync::broadcast;

use parley_chat::{Chat, Message};
use parley_session::{
    Preferences, PreferencesUpdate, SessionStore, StoreEvent, UserProfile, UserProfileUpdate,
};
use parley_storage::Database;

use crate::config::Config;
use crate::summary::ChatSummary;
use crate::Result;

const AUTHENTICATED_KEY: &str = "is_authenticated";

pub struct App {
    config: Config,
    db: Database,
    store: SessionStore,
}

impl App {
    /// Open the settings database and start the session store.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    /// Like [`App::new`] but with a throwaway database
    pub fn open_in_memory(config: Config) -> Result<Self> {
        config.validate()?;
        Self::with_database(config, Database::open_in_memory()?)
    }

    fn with_database(config: Config, db: Database) -> Result<Self> {
        let store = SessionStore::start(config.session_config())?;

        tracing::info!(database = %config.database_path.display(), "Parley initialized");

        Ok(Self { config, db, store })
    }

    // === Authentication flag ===

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.db.get_flag(AUTHENTICATED_KEY)?.unwrap_or(false))
    }

    pub fn set_authenticated(&self, authenticated: bool) -> Result<()> {
        self.db.set_flag(AUTHENTICATED_KEY, authenticated)?;

        tracing::info!(authenticated, "Updated authentication flag");

        Ok(())
    }

    pub fn log_out(&self) -> Result<()> {
        self.db.remove_setting(AUTHENTICATED_KEY)?;
        tracing::info!("Logged out");
        Ok(())
    }

    // === Chat operations ===

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }

    pub fn create_chat(&self) -> Chat {
        self.store.create_chat()
    }

    pub fn select_chat(&self, chat_id: &str) -> Option<Chat> {
        self.store.select_chat(chat_id)
    }

    pub fn delete_chat(&self, chat_id: &str) -> Option<Chat> {
        self.store.delete_chat(chat_id)
    }

    pub fn send_message(&self, text: &str) -> Option<Message> {
        self.store.send_message(text)
    }

    pub fn chats(&self) -> Vec<Chat> {
        self.store.chats()
    }

    pub fn active_chat(&self) -> Option<Chat> {
        self.store.active_chat()
    }

    /// Sidebar rows for chats matching `query`, most recent first
    pub fn chat_summaries(&self, query: &str) -> Vec<ChatSummary> {
        let now = Utc::now();
        let active = self.store.active_chat_id();

        self.store
            .search_chats(query)
            .iter()
            .map(|chat| ChatSummary::new(chat, active.as_deref(), now))
            .collect()
    }

    // === Profile and preferences ===

    pub fn profile(&self) -> UserProfile {
        self.store.profile()
    }

    pub fn update_user_profile(&self, update: UserProfileUpdate) -> UserProfile {
        self.store.update_user_profile(update)
    }

    pub fn preferences(&self) -> Preferences {
        self.store.preferences()
    }

    pub fn update_preferences(&self, update: PreferencesUpdate) -> Preferences {
        self.store.update_preferences(update)
    }

    // === Config ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            store: self.store.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use parley_session::SessionError;
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_config() -> Config {
        Config::new(PathBuf::from("/tmp/parley-test"))
    }

    #[test]
    fn test_requires_runtime() {
        let result = App::open_in_memory(test_config());
        assert!(matches!(
            result,
            Err(CoreError::Session(SessionError::NoRuntime))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_flag() {
        let app = App::open_in_memory(test_config()).unwrap();
        assert!(!app.is_authenticated().unwrap());

        app.set_authenticated(true).unwrap();
        assert!(app.is_authenticated().unwrap());

        app.log_out().unwrap();
        assert!(!app.is_authenticated().unwrap());
        assert_eq!(app.database().get_flag(AUTHENTICATED_KEY).unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_auth_flag_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("nested"));

        {
            let app = App::new(config.clone()).unwrap();
            app.set_authenticated(true).unwrap();
            app.create_chat();
            assert_eq!(app.chats().len(), 3);
        }

        let app = App::new(config).unwrap();
        assert!(app.is_authenticated().unwrap());

        let titles: Vec<String> = app.chats().iter().map(|c| c.title().to_string()).collect();
        assert_eq!(titles, vec!["Getting Started", "Project Ideas"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_getting_started_scenario() {
        let app = App::open_in_memory(test_config()).unwrap();
        assert_eq!(app.active_chat().unwrap().title(), "Getting Started");

        app.send_message("hello").unwrap();
        assert_eq!(app.active_chat().unwrap().message_count(), 2);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let chat = app.active_chat().unwrap();
        assert_eq!(chat.message_count(), 3);
        assert!(chat.last_message().unwrap().text.contains("hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_summaries() {
        let app = App::open_in_memory(test_config()).unwrap();
        let created = app.create_chat();

        let rows = app.chat_summaries("");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, created.id());
        assert!(rows[0].is_active);
        assert_eq!(rows[0].preview, "How can I assist you today?");
        assert!(rows.iter().skip(1).all(|r| !r.is_active));

        let rows = app.chat_summaries("project");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Project Ideas");
    }

    #[tokio::test(start_paused = true)]
    async fn test_config_reaches_store() {
        let mut config = test_config();
        config.reply_delay_ms = 50;
        config.seed_chats = false;
        config.new_chat_title = "Fresh".to_string();

        let app = App::open_in_memory(config).unwrap();
        assert!(app.chats().is_empty());

        let chat = app.create_chat();
        assert_eq!(chat.title(), "Fresh");

        app.send_message("ping").unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(app.active_chat().unwrap().message_count(), 3);
    }
}
