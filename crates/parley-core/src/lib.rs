//! Parley Core
//!
//! Coordination layer for the chat front end. The presentation layer is a
//! pure renderer: everything it shows comes from [`App`].

mod app;
mod config;
mod error;
mod summary;

pub use app::App;
pub use config::Config;
pub use error::CoreError;
pub use summary::ChatSummary;

// Re-export core components
pub use parley_chat::{format_relative, format_time, Chat, ChatError, ChatList, Message, Sender};
pub use parley_session::{
    EchoResponder, FontSize, Notification, Preferences, PreferencesUpdate, Responder,
    SessionConfig, SessionError, SessionStore, StoreEvent, UserProfile, UserProfileUpdate,
};
pub use parley_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A host may already have installed a subscriber
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
        tracing::info!("logging initialized");
    }
}
