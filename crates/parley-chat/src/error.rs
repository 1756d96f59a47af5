//! Chat error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChatError {
    #[error("Chat not found: {0}")]
    NotFound(String),

    #[error("Duplicate chat id: {0}")]
    DuplicateId(String),

    #[error("Unknown sender: {0}")]
    UnknownSender(String),
}
