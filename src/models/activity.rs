use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity class of an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogResult {
    Success,
    Warn,
    Error,
    Undo,
}

impl LogResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogResult::Success => "success",
            LogResult::Warn => "warn",
            LogResult::Error => "error",
            LogResult::Undo => "undo",
        }
    }
}

/// Immutable record of one scan outcome (every outcome, not only successes).
/// Carries whichever of id/name was known at the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub ts: DateTime<Utc>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub result: LogResult,
    pub message: String,
}

impl ActivityLogEntry {
    /// Best available display label: name, then id, then a placeholder.
    pub fn who(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.id.as_deref())
            .unwrap_or("unknown")
    }
}
