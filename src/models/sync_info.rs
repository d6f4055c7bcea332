use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Freshness marker for the local roster snapshot.
/// Updated only on a successful full pull from the remote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncInfo {
    #[serde(default)]
    pub last_synced_at: Option<DateTime<Utc>>,
}
