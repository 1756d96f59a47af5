//! Parley Session Store
//!
//! The single owner of chat state:
//! - The chat list and the active chat
//! - The user profile and preferences
//! - Deferred assistant replies, applied by chat id once their delay elapses
//!
//! Views hold a cloned [`SessionStore`] handle, read snapshots from it and
//! listen for [`StoreEvent`]s.

mod config;
mod error;
mod event;
mod profile;
mod reply;
mod responder;
mod state;
mod store;

pub use config::{SessionConfig, DEFAULT_REPLY_DELAY};
pub use error::SessionError;
pub use event::{Notification, StoreEvent};
pub use profile::{FontSize, Preferences, PreferencesUpdate, UserProfile, UserProfileUpdate};
pub use responder::{EchoResponder, Responder};
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, SessionError>;
