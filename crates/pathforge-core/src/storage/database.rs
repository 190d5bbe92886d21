//! SQLite-backed snapshot persistence.
//!
//! The whole engine state is serialized as one JSON snapshot into a
//! key-value table. Bindings load it once at startup and write it through
//! after every mutation; there is no partial update path, so a snapshot on
//! disk is always internally consistent.

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::engine::EngineState;
use crate::error::StorageError;

const STATE_KEY: &str = "engine_state";

/// Load/save/wipe surface the engine binds to. Implemented by [`Database`];
/// tests can substitute an in-memory instance.
pub trait StateStore {
    /// Load the persisted snapshot. `Ok(None)` on first run.
    ///
    /// # Errors
    /// Returns [`StorageError::CorruptSnapshot`] when a stored snapshot no
    /// longer decodes; callers are expected to fail soft and start fresh.
    fn load(&self) -> Result<Option<EngineState>, StorageError>;

    /// Persist the full snapshot, replacing any previous one.
    fn save(&self, state: &EngineState) -> Result<(), StorageError>;

    /// Remove the persisted snapshot.
    fn wipe(&self) -> Result<(), StorageError>;
}

/// SQLite database holding the engine snapshot.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/pathforge/pathforge.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("pathforge.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a value from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl StateStore for Database {
    fn load(&self) -> Result<Option<EngineState>, StorageError> {
        let Some(raw) = self.kv_get(STATE_KEY)? else {
            return Ok(None);
        };
        let state: EngineState = serde_json::from_str(&raw)
            .map_err(|e| StorageError::CorruptSnapshot(e.to_string()))?;
        Ok(Some(state))
    }

    fn save(&self, state: &EngineState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)
            .map_err(|e| StorageError::CorruptSnapshot(e.to_string()))?;
        self.kv_set(STATE_KEY, &raw)?;
        Ok(())
    }

    fn wipe(&self) -> Result<(), StorageError> {
        self.kv_delete(STATE_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::identity::{Gender, IdentityPath, Profile};

    #[test]
    fn load_on_fresh_database_is_none() {
        let db = Database::open_memory().unwrap();
        assert!(db.load().unwrap().is_none());
    }

    #[test]
    fn snapshot_roundtrip() {
        let db = Database::open_memory().unwrap();
        let mut engine = Engine::new();
        engine.set_identity(IdentityPath::Scholar).unwrap();
        engine.set_profile(Profile::new("Mina", 24, Gender::Female).unwrap());
        engine.persist(&db).unwrap();

        let restored = Engine::load_or_default(&db);
        assert_eq!(restored.state(), engine.state());
    }

    #[test]
    fn corrupt_snapshot_is_reported_and_load_or_default_recovers() {
        let db = Database::open_memory().unwrap();
        db.kv_set(STATE_KEY, "{not json").unwrap();
        assert!(matches!(
            db.load(),
            Err(StorageError::CorruptSnapshot(_))
        ));
        let engine = Engine::load_or_default(&db);
        assert_eq!(engine.state().total_xp, 0);
    }

    #[test]
    fn wipe_removes_snapshot() {
        let db = Database::open_memory().unwrap();
        Engine::new().persist(&db).unwrap();
        assert!(db.load().unwrap().is_some());
        StateStore::wipe(&db).unwrap();
        assert!(db.load().unwrap().is_none());
    }

    #[test]
    fn open_at_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathforge.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.kv_set("k", "v").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v"));
    }
}
