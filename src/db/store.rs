//! SQLite-backed key-value store of whole-value JSON blobs (lightweight for
//! CLI usage).

use crate::db::initialize::init_store;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Logical keys of the persisted records.
pub const KEY_ATTENDEES: &str = "attendees";
pub const KEY_LOGS: &str = "logs";
pub const KEY_SYNC_INFO: &str = "sync_info";

pub struct LocalStore {
    pub conn: Connection,
}

impl LocalStore {
    /// Open (or create) the store at `path` and ensure the schema exists.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        init_store(&conn)?;
        Ok(Self { conn })
    }

    /// Read a whole-value blob. A missing row or an unparseable value yields
    /// the default, never an error: a degraded snapshot must not block the
    /// door.
    pub fn get<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .ok()
            .flatten();

        match raw {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => T::default(),
        }
    }

    /// Write a whole-value blob (insert or replace).
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Storage(format!("cannot encode '{key}': {e}")))?;
        self.conn.execute(
            "INSERT INTO store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, json],
        )?;
        Ok(())
    }
}
