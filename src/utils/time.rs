//! Timestamp display helpers. Everything is stored in UTC and shown in the
//! local timezone of the device at the door.

use chrono::{DateTime, Local, Utc};

/// Full timestamp for tables and status output.
pub fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Optional timestamp, "--" when absent.
pub fn format_ts_opt(ts: &Option<DateTime<Utc>>) -> String {
    match ts {
        Some(t) => format_ts(t),
        None => "--".to_string(),
    }
}
