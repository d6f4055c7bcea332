//! In-memory roster backed by the local store.
//!
//! Mutations are copy-on-write: the candidate list is persisted first and
//! adopted in memory only after the write succeeds, so a failed write leaves
//! the loaded roster untouched.

use crate::db::store::{KEY_ATTENDEES, LocalStore};
use crate::errors::AppResult;
use crate::models::attendee::{Attendee, RosterTally, Status, tally};
use chrono::{DateTime, Utc};

pub struct RosterStore {
    attendees: Vec<Attendee>,
}

impl RosterStore {
    /// Load the roster snapshot from the store. Missing or corrupt data
    /// yields an empty roster.
    pub fn load(store: &LocalStore) -> Self {
        Self {
            attendees: store.get(KEY_ATTENDEES),
        }
    }

    pub fn all(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn get(&self, id: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }

    pub fn tally(&self) -> RosterTally {
        tally(&self.attendees)
    }

    /// Replace the whole roster wholesale (sync adoption).
    pub fn replace_all(&mut self, store: &LocalStore, attendees: Vec<Attendee>) -> AppResult<()> {
        store.put(KEY_ATTENDEES, &attendees)?;
        self.attendees = attendees;
        Ok(())
    }

    /// Mark `id` as checked in at `at`.
    pub fn apply_check_in(
        &mut self,
        store: &LocalStore,
        id: &str,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.apply(store, id, Status::CheckedIn, Some(at))
    }

    /// Revert `id` to not-yet-arrived and clear its timestamp.
    pub fn apply_undo(&mut self, store: &LocalStore, id: &str) -> AppResult<()> {
        self.apply(store, id, Status::NotYet, None)
    }

    fn apply(
        &mut self,
        store: &LocalStore,
        id: &str,
        status: Status,
        checked_in_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let Some(pos) = self.attendees.iter().position(|a| a.id == id) else {
            return Ok(());
        };
        let mut next = self.attendees.clone();
        next[pos].status = status;
        next[pos].checked_in_at = checked_in_at;
        store.put(KEY_ATTENDEES, &next)?;
        self.attendees = next;
        Ok(())
    }
}
