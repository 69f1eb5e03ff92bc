use crate::store::PreferenceStore;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// SQLite-backed preference store.
///
/// One `preferences` table holds string values by key. Clones share the same
/// connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the store at `path` and make sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open preference store at {}", path.display()))?;

        Self::init(conn)
    }

    /// Open a private in-memory database (lost when dropped).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory store")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create preferences table")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Preference store connection lock poisoned"))
    }

    /// Read a value, surfacing database errors.
    pub fn try_get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to read preference")?;

        Ok(value)
    }

    /// Insert or replace a value, surfacing database errors.
    pub fn try_put(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .context("Failed to write preference")?;

        Ok(())
    }

    /// Delete a value, returning whether a row was removed.
    pub fn try_remove(&self, key: &str) -> Result<bool> {
        let conn = self.lock()?;
        let rows_affected = conn
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])
            .context("Failed to remove preference")?;

        Ok(rows_affected > 0)
    }
}

impl PreferenceStore for SqliteStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Preference read failed, treating as absent");
                None
            }
        }
    }

    fn put_string(&self, key: &str, value: &str) -> bool {
        match self.try_put(key, value) {
            Ok(()) => {
                debug!(key, "Preference committed");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "Preference write failed");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.try_remove(key) {
            Ok(removed) => removed,
            Err(e) => {
                warn!(key, error = %e, "Preference removal failed");
                false
            }
        }
    }
}
