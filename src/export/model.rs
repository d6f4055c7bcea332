use crate::models::attendee::Attendee;
use serde::Serialize;

/// Flat roster row for export files. Optional fields become empty strings,
/// timestamps RFC 3339.
#[derive(Serialize, Clone, Debug)]
pub struct AttendeeExport {
    pub id: String,
    pub name: String,
    pub email: String,
    pub note: String,
    pub status: String,
    pub checked_in_at: String,
}

impl AttendeeExport {
    pub(crate) fn from_attendee(a: &Attendee) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            email: a.email.clone().unwrap_or_default(),
            note: a.note.clone().unwrap_or_default(),
            status: a.status.as_str().to_string(),
            checked_in_at: a
                .checked_in_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}
