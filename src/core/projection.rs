//! Derived activity view, recomputed on every read.
//!
//! The raw append log and the roster stay independent sources of truth.
//! Successes are synthesized from roster state so sync-pulled check-ins
//! show up in history even when this device never saw the scan; locally
//! logged successes are shadowed by the synthesized ones, which is the
//! duplicate suppression.

use crate::models::activity::{ActivityLogEntry, LogResult};
use crate::models::attendee::{Attendee, Status};

/// Merge roster-derived success entries with locally recorded non-success
/// entries, newest first. Checked-in rows without a timestamp (possible in
/// sync-pulled data) are skipped.
pub fn merged_activity(
    attendees: &[Attendee],
    local: &[ActivityLogEntry],
) -> Vec<ActivityLogEntry> {
    let mut merged: Vec<ActivityLogEntry> = attendees
        .iter()
        .filter(|a| a.status == Status::CheckedIn)
        .filter_map(|a| {
            a.checked_in_at.map(|ts| ActivityLogEntry {
                ts,
                id: Some(a.id.clone()),
                name: Some(a.name.clone()),
                result: LogResult::Success,
                message: "checked in".to_string(),
            })
        })
        .collect();

    merged.extend(
        local
            .iter()
            .filter(|e| e.result != LogResult::Success)
            .cloned(),
    );

    merged.sort_by(|a, b| b.ts.cmp(&a.ts));
    merged
}
