//! Parley Chats
//!
//! A chat is an ordered conversation between the user and the assistant.
//! Chats only ever grow: messages are appended and never edited.

mod chat;
mod display;
mod error;
mod list;
mod message;

pub use chat::Chat;
pub use display::{format_relative, format_time};
pub use error::ChatError;
pub use list::ChatList;
pub use message::{Message, Sender};

pub type Result<T> = std::result::Result<T, ChatError>;
