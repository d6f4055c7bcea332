use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Attendance state of a single attendee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NotYet,
    CheckedIn,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotYet => "not_yet",
            Status::CheckedIn => "checked_in",
            Status::Inactive => "inactive",
        }
    }
}

/// One row of the roster. Field names match the wire format of the remote
/// backend (`getAttendees` / `upsertAttendees`) as well as the local
/// snapshot blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Absent or null status means the attendee has not arrived yet.
    #[serde(default, deserialize_with = "nullable_status")]
    pub status: Status,
    /// Set exactly when `status` becomes `CheckedIn`, cleared on undo.
    #[serde(default, deserialize_with = "nullable_timestamp")]
    pub checked_in_at: Option<DateTime<Utc>>,
}

fn nullable_status<'de, D>(de: D) -> Result<Status, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Status>::deserialize(de)?.unwrap_or_default())
}

/// Remote timestamps come out of spreadsheet cells: absent, null, empty or
/// unparseable values all read back as "never checked in".
fn nullable_timestamp<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

/// Headline counters shown on the check-in surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterTally {
    pub total: usize,
    pub checked_in: usize,
    pub not_yet: usize,
    pub inactive: usize,
}

pub fn tally(attendees: &[Attendee]) -> RosterTally {
    let mut t = RosterTally {
        total: attendees.len(),
        ..Default::default()
    };
    for a in attendees {
        match a.status {
            Status::CheckedIn => t.checked_in += 1,
            Status::NotYet => t.not_yet += 1,
            Status::Inactive => t.inactive += 1,
        }
    }
    t
}
