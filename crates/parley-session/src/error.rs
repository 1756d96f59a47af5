//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session store must be started inside a Tokio runtime")]
    NoRuntime,

    #[error("Unknown font size: {0}")]
    UnknownFontSize(String),
}
