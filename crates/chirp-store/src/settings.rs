//! Key-value settings collaborator.
//!
//! The client persists exactly one value through this interface (the
//! nickname), but the trait is a plain string map so other small settings
//! can live alongside it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::{Result, StoreError};

/// A string-keyed settings backend.
pub trait SettingsStore: Send + Sync {
    /// Read `key`; `Ok(None)` when it was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key.
    fn clear(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Settings that live only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {e}")))
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.values()?.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SQLite
// ---------------------------------------------------------------------------

/// Settings persisted in the `settings` table of a [`Database`].
pub struct SqliteSettings {
    db: Mutex<Database>,
}

impl SqliteSettings {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Open the default application database.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Database::new()?))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        Ok(Self::new(Database::open_at(path)?))
    }

    fn db(&self) -> Result<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {e}")))
    }
}

impl SettingsStore for SqliteSettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db()?
            .conn()
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db()?.conn().execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db()?
            .conn()
            .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.db()?.conn().execute("DELETE FROM settings", [])?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.db().ok().and_then(|db| db.path());
        f.debug_struct("SqliteSettings").field("path", &path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(settings: &dyn SettingsStore) {
        assert_eq!(settings.get("nickname").unwrap(), None);

        settings.set("nickname", "Alice").unwrap();
        assert_eq!(settings.get("nickname").unwrap().as_deref(), Some("Alice"));

        settings.set("nickname", "Bob").unwrap();
        assert_eq!(settings.get("nickname").unwrap().as_deref(), Some("Bob"));

        settings.set("theme", "dark").unwrap();
        settings.remove("nickname").unwrap();
        assert_eq!(settings.get("nickname").unwrap(), None);
        assert_eq!(settings.get("theme").unwrap().as_deref(), Some("dark"));

        settings.clear().unwrap();
        assert_eq!(settings.get("theme").unwrap(), None);
    }

    #[test]
    fn test_memory_settings() {
        exercise(&MemorySettings::new());
    }

    #[test]
    fn test_sqlite_settings() {
        exercise(&SqliteSettings::new(Database::open_in_memory().unwrap()));
    }

    #[test]
    fn test_sqlite_settings_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");

        SqliteSettings::open_at(&path)
            .unwrap()
            .set("nickname", "Alice")
            .unwrap();

        let reopened = SqliteSettings::open_at(&path).unwrap();
        assert_eq!(reopened.get("nickname").unwrap().as_deref(), Some("Alice"));
    }
}
