//! Parley Storage Layer
//!
//! SQLite-backed key/value settings. Chat data is never written here;
//! only small session-level flags survive a restart.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
