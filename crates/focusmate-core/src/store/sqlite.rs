//! SQLite-backed key-value store.
//!
//! One table, `kv(key, value)`, with every value stored as JSON text.
//! The database lives at `<data dir>/focusmate.db`.

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::{data_dir, KvStore, Writes};
use crate::error::{Result, StoreError};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store in the data directory.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("focusmate.db"))
    }

    /// Open (or create) the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned.into())
    }
}

fn read_one(conn: &Connection, key: &str) -> Result<Option<Value>> {
    let raw: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()?;
    match raw {
        Some(text) => Ok(Some(parse_value(key, &text))),
        None => Ok(None),
    }
}

fn write_one(conn: &Connection, key: &str, value: &Value) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
        params![key, serde_json::to_string(value)?],
    )?;
    Ok(())
}

/// Rows written by hand may not be valid JSON; keep them readable as strings.
fn parse_value(key: &str, text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "stored value is not JSON, reading it as a string");
        Value::String(text.to_string())
    })
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let conn = self.lock()?;
        read_one(&conn, key)
    }

    fn get_all(&self) -> Result<BTreeMap<String, Value>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT key, value FROM kv")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut all = BTreeMap::new();
        for row in rows {
            let (key, text) = row?;
            let value = parse_value(&key, &text);
            all.insert(key, value);
        }
        Ok(all)
    }

    fn set_many(&self, items: Writes) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for (key, value) in &items {
            write_one(&tx, key, value)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn update(
        &self,
        keys: &[&str],
        f: &mut dyn FnMut(&[Option<Value>]) -> Writes,
    ) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut current = Vec::with_capacity(keys.len());
        for key in keys {
            current.push(read_one(&tx, key)?);
        }
        for (key, value) in f(&current) {
            write_one(&tx, &key, &value)?;
        }
        tx.commit()?;
        Ok(())
    }
}
