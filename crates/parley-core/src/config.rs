//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use parley_session::{Preferences, SessionConfig, UserProfile};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the settings database
    pub database_path: PathBuf,
    /// Delay before the assistant reply lands, in milliseconds
    pub reply_delay_ms: u64,
    /// Start with the two example chats
    pub seed_chats: bool,
    pub new_chat_title: String,
    pub new_chat_greeting: String,
    pub profile: UserProfile,
    pub preferences: Preferences,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let session = SessionConfig::default();

        Self {
            database_path: data_dir.join("parley.db"),
            reply_delay_ms: session.reply_delay.as_millis() as u64,
            seed_chats: session.seed_chats,
            new_chat_title: session.new_chat_title,
            new_chat_greeting: session.new_chat_greeting,
            profile: session.profile,
            preferences: session.preferences,
        }
    }

    /// Per-user data directory, falling back to `.parley` in the working
    /// directory when the platform has none
    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Parley"))
            .unwrap_or_else(|| PathBuf::from(".parley"))
    }

    /// Load a JSON config file. Missing keys fall back to the defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded config file");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.new_chat_title.trim().is_empty() {
            return Err(CoreError::Config(
                "new_chat_title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            new_chat_title: self.new_chat_title.clone(),
            new_chat_greeting: self.new_chat_greeting.clone(),
            seed_chats: self.seed_chats,
            profile: self.profile.clone(),
            preferences: self.preferences.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_session::FontSize;

    #[test]
    fn test_defaults_match_session_defaults() {
        let config = Config::new(PathBuf::from("/tmp/parley"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/parley/parley.db"));

        let session = config.session_config();
        assert_eq!(session.reply_delay, Duration::from_millis(1000));
        assert!(session.seed_chats);
        assert_eq!(session.new_chat_title, "New Conversation");
    }

    #[test]
    fn test_default_database_lives_in_data_dir() {
        let config = Config::default();
        assert_eq!(config.database_path, Config::data_dir().join("parley.db"));
        assert!(Config::data_dir().ends_with("Parley") || Config::data_dir().ends_with(".parley"));
    }

    #[test]
    fn test_partial_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.json");
        std::fs::write(
            &path,
            r#"{
                "reply_delay_ms": 250,
                "seed_chats": false,
                "preferences": {
                    "dark_mode": false,
                    "font_size": "large",
                    "notifications_enabled": true,
                    "autocomplete_suggestions": false
                }
            }"#,
        )
        .unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.reply_delay_ms, 250);
        assert!(!config.seed_chats);
        assert_eq!(config.preferences.font_size, FontSize::Large);
        assert_eq!(config.new_chat_greeting, "How can I assist you today?");
        assert_eq!(config.profile, UserProfile::default());
    }

    #[test]
    fn test_invalid_files_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let missing = Config::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(CoreError::Io(_))));

        let bad_json = dir.path().join("bad.json");
        std::fs::write(&bad_json, "{ not json").unwrap();
        assert!(matches!(
            Config::from_json_file(&bad_json),
            Err(CoreError::Serialization(_))
        ));

        let blank_title = dir.path().join("blank.json");
        std::fs::write(&blank_title, r#"{"new_chat_title": "  "}"#).unwrap();
        assert!(matches!(
            Config::from_json_file(&blank_title),
            Err(CoreError::Config(_))
        ));
    }
}
