//! Settings database
//!
//! One SQLite connection shared by every clone of [`Database`]. The schema
//! holds a single `settings` table of string values; boolean flags are
//! stored as `"true"` / `"false"`.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the settings file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;

        // Write-ahead log so a second process can read the flag mid-write
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        tracing::debug!(path = %path.display(), journal_mode = %mode, "Opened settings database");

        Self::from_connection(conn)
    }

    /// Settings that vanish with the process
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with exclusive access to the connection
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            Ok(conn
                .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?)
        })
    }

    /// When `key` was last written, if it exists
    pub fn setting_updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT updated_at FROM settings WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?)
        })?;

        Ok(raw
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|t| t.with_timezone(&Utc)))
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();

        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )?;
            Ok(())
        })?;

        tracing::debug!(key = %key, "Stored setting");
        Ok(())
    }

    /// Remove a setting. Returns whether a row was deleted.
    pub fn remove_setting(&self, key: &str) -> Result<bool> {
        let removed = self.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM settings WHERE key = ?1", [key])?)
        })?;

        if removed > 0 {
            tracing::debug!(key = %key, "Removed setting");
        }
        Ok(removed > 0)
    }

    /// Read a boolean flag. Anything other than `"true"` reads as `false`;
    /// a missing row is `None`.
    pub fn get_flag(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.get_setting(key)?.map(|v| v == "true"))
    }

    pub fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        self.set_setting(key, if value { "true" } else { "false" })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_starts_empty() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_settings_overwrite_and_remove() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_setting("is_authenticated").unwrap(), None);

        db.set_setting("is_authenticated", "true").unwrap();
        db.set_setting("is_authenticated", "false").unwrap();
        assert_eq!(
            db.get_setting("is_authenticated").unwrap().as_deref(),
            Some("false")
        );

        assert!(db.remove_setting("is_authenticated").unwrap());
        assert!(!db.remove_setting("is_authenticated").unwrap());
        assert_eq!(db.get_setting("is_authenticated").unwrap(), None);
    }

    #[test]
    fn test_flags() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_flag("is_authenticated").unwrap(), None);

        db.set_flag("is_authenticated", true).unwrap();
        assert_eq!(db.get_flag("is_authenticated").unwrap(), Some(true));
        assert_eq!(
            db.get_setting("is_authenticated").unwrap().as_deref(),
            Some("true")
        );

        db.set_flag("is_authenticated", false).unwrap();
        assert_eq!(db.get_flag("is_authenticated").unwrap(), Some(false));

        db.set_setting("is_authenticated", "yes").unwrap();
        assert_eq!(db.get_flag("is_authenticated").unwrap(), Some(false));
    }

    #[test]
    fn test_overwrite_bumps_updated_at() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.setting_updated_at("is_authenticated").unwrap(), None);

        let before = Utc::now();
        db.set_flag("is_authenticated", true).unwrap();
        let first = db.setting_updated_at("is_authenticated").unwrap().unwrap();
        assert!(first >= before - chrono::Duration::seconds(1));

        db.set_flag("is_authenticated", false).unwrap();
        let second = db.setting_updated_at("is_authenticated").unwrap().unwrap();
        assert!(second >= first);
    }

    #[test]
    fn test_settings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.db");

        {
            let db = Database::open(&path).unwrap();
            db.set_flag("is_authenticated", true).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_flag("is_authenticated").unwrap(), Some(true));
    }

    #[test]
    fn test_clones_share_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();
        db.set_setting("theme", "dark").unwrap();
        assert_eq!(other.get_setting("theme").unwrap().as_deref(), Some("dark"));
    }
}
