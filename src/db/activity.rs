//! Persisted activity log, newest first, capped.

use crate::db::store::{KEY_LOGS, LocalStore};
use crate::errors::AppResult;
use crate::models::activity::ActivityLogEntry;

/// Retention cap: only the newest entries survive an append.
pub const LOG_CAP: usize = 100;

/// Prepend `entry` to the stored log, trimming to [`LOG_CAP`].
pub fn append(store: &LocalStore, entry: ActivityLogEntry) -> AppResult<()> {
    let mut logs: Vec<ActivityLogEntry> = store.get(KEY_LOGS);
    logs.insert(0, entry);
    logs.truncate(LOG_CAP);
    store.put(KEY_LOGS, &logs)
}

/// Stored entries, newest first.
pub fn recent(store: &LocalStore) -> Vec<ActivityLogEntry> {
    store.get(KEY_LOGS)
}

/// Drop every stored entry.
pub fn clear(store: &LocalStore) -> AppResult<()> {
    store.put(KEY_LOGS, &Vec::<ActivityLogEntry>::new())
}
