//! Schema creation for the local store.

use crate::errors::AppResult;
use rusqlite::Connection;

/// Create the key-value table if it does not exist yet.
pub fn init_store(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS store (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    Ok(())
}
