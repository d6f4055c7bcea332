//! Check-in state machine: payload parsing, validation, the debounce gate
//! and the single-slot undo memory.

use crate::config::Config;
use crate::core::notify::RemoteNotifier;
use crate::db::activity;
use crate::db::roster::RosterStore;
use crate::db::store::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::models::activity::{ActivityLogEntry, LogResult};
use crate::models::attendee::Status;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Prefix used for manual entry when no event code is configured. Code
/// validation is skipped in that case, so the value never has to match.
const MANUAL_CODE_PLACEHOLDER: &str = "EVENT";

/// Resolved result of one scan or undo. Every rejection is a value here,
/// never an `Err`: the door keeps moving.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Success { id: String, name: String },
    AlreadyCheckedIn { id: String, name: String },
    Inactive { id: String, name: String },
    UnknownId { id: String },
    CodeMismatch { code: String },
    Malformed { payload: String },
    Undone { id: String, name: String },
}

impl ScanOutcome {
    pub fn log_result(&self) -> LogResult {
        match self {
            ScanOutcome::Success { .. } => LogResult::Success,
            ScanOutcome::AlreadyCheckedIn { .. } => LogResult::Warn,
            ScanOutcome::Undone { .. } => LogResult::Undo,
            ScanOutcome::Inactive { .. }
            | ScanOutcome::UnknownId { .. }
            | ScanOutcome::CodeMismatch { .. }
            | ScanOutcome::Malformed { .. } => LogResult::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScanOutcome::Success { .. } => "checked in",
            ScanOutcome::AlreadyCheckedIn { .. } => "already checked in",
            ScanOutcome::Inactive { .. } => "inactive attendee",
            ScanOutcome::UnknownId { .. } => "unknown attendee",
            ScanOutcome::CodeMismatch { .. } => "event code mismatch",
            ScanOutcome::Malformed { .. } => "malformed payload",
            ScanOutcome::Undone { .. } => "check-in undone",
        }
    }

    /// Banner label: the attendee name when known, otherwise the offending
    /// detail of the rejection.
    pub fn subject(&self) -> &str {
        match self {
            ScanOutcome::Success { id, name }
            | ScanOutcome::AlreadyCheckedIn { id, name }
            | ScanOutcome::Inactive { id, name }
            | ScanOutcome::Undone { id, name } => {
                if name.is_empty() { id } else { name }
            }
            ScanOutcome::UnknownId { id } => id,
            ScanOutcome::CodeMismatch { code } => code,
            ScanOutcome::Malformed { payload } => payload,
        }
    }

    fn log_entry(&self, ts: DateTime<Utc>) -> ActivityLogEntry {
        let (id, name) = match self {
            ScanOutcome::Success { id, name }
            | ScanOutcome::AlreadyCheckedIn { id, name }
            | ScanOutcome::Inactive { id, name }
            | ScanOutcome::Undone { id, name } => (Some(id.clone()), Some(name.clone())),
            ScanOutcome::UnknownId { id } => (Some(id.clone()), None),
            ScanOutcome::CodeMismatch { .. } | ScanOutcome::Malformed { .. } => (None, None),
        };
        ActivityLogEntry {
            ts,
            id,
            name,
            result: self.log_result(),
            message: self.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Idle,
    Holding { until: Instant },
}

/// Debounce gate between the scanner and the engine. While a result is
/// held, further scans are dropped outright (never queued): a badge left
/// in front of the camera must not produce duplicate transitions.
///
/// The gate is explicit state, not a timer. Passing `Instant` in keeps it
/// testable without sleeping.
pub struct ScanGate {
    state: GateState,
    hold: Duration,
}

impl ScanGate {
    pub fn new(hold: Duration) -> Self {
        Self {
            state: GateState::Idle,
            hold,
        }
    }

    /// May a scan proceed right now? Clears an expired hold as a side
    /// effect.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.state {
            GateState::Idle => true,
            GateState::Holding { until } if now >= until => {
                self.state = GateState::Idle;
                true
            }
            GateState::Holding { .. } => false,
        }
    }

    /// Arm the gate after a result has been shown.
    pub fn hold(&mut self, now: Instant) {
        self.state = GateState::Holding {
            until: now + self.hold,
        };
    }

    /// Clear the hold early (result dismissed).
    pub fn dismiss(&mut self) {
        self.state = GateState::Idle;
    }
}

/// One engine per check-in session. Owns the gate and the undo slot;
/// roster and log mutations go through the stores passed per call.
pub struct CheckInEngine {
    gate: ScanGate,
    last_check_in: Option<String>,
}

impl CheckInEngine {
    pub fn new(hold: Duration) -> Self {
        Self {
            gate: ScanGate::new(hold),
            last_check_in: None,
        }
    }

    /// Run one decoded payload through the state machine.
    ///
    /// `Ok(None)` means the gate dropped the scan. Otherwise exactly one
    /// activity entry has been appended and the gate re-armed; on success
    /// the roster was committed locally and the remote notified in the
    /// background. Only storage write failures escalate to `Err`.
    pub fn handle_scan(
        &mut self,
        store: &LocalStore,
        roster: &mut RosterStore,
        config: &Config,
        notifier: &mut RemoteNotifier,
        payload: &str,
    ) -> AppResult<Option<ScanOutcome>> {
        if !self.gate.try_acquire(Instant::now()) {
            return Ok(None);
        }

        let outcome = self.evaluate(store, roster, config, notifier, payload)?;
        self.gate.hold(Instant::now());
        Ok(Some(outcome))
    }

    /// Manual entry: synthesize the payload shape from a raw id and run it
    /// through the same machine.
    pub fn handle_manual(
        &mut self,
        store: &LocalStore,
        roster: &mut RosterStore,
        config: &Config,
        notifier: &mut RemoteNotifier,
        id: &str,
    ) -> AppResult<Option<ScanOutcome>> {
        let code = if config.event_code.is_empty() {
            MANUAL_CODE_PLACEHOLDER
        } else {
            config.event_code.as_str()
        };
        let payload = format!("{code}:{id}");
        self.handle_scan(store, roster, config, notifier, &payload)
    }

    /// The id the next undo would revert, if any.
    pub fn undo_target(&self) -> Option<&str> {
        self.last_check_in.as_deref()
    }

    /// Revert the most recent successful check-in of this session. One
    /// level deep: consumed on use, superseded by newer successes.
    /// Confirmation is the caller's job.
    pub fn undo_last(
        &mut self,
        store: &LocalStore,
        roster: &mut RosterStore,
        notifier: &mut RemoteNotifier,
    ) -> AppResult<ScanOutcome> {
        let id = match self.last_check_in.clone() {
            Some(id) => id,
            None => return Err(AppError::NothingToUndo),
        };
        let name = roster.get(&id).map(|a| a.name.clone()).unwrap_or_default();

        roster.apply_undo(store, &id)?;

        let outcome = ScanOutcome::Undone {
            id: id.clone(),
            name,
        };
        activity::append(store, outcome.log_entry(Utc::now()))?;
        notifier.undo_check_in(&id);
        self.last_check_in = None;

        Ok(outcome)
    }

    /// Drop the current hold so the next scan is accepted immediately.
    pub fn dismiss(&mut self) {
        self.gate.dismiss();
    }

    fn evaluate(
        &mut self,
        store: &LocalStore,
        roster: &mut RosterStore,
        config: &Config,
        notifier: &mut RemoteNotifier,
        payload: &str,
    ) -> AppResult<ScanOutcome> {
        let outcome = match parse_payload(payload) {
            None => ScanOutcome::Malformed {
                payload: payload.to_string(),
            },
            Some((code, id)) => {
                if !config.event_code.is_empty() && code != config.event_code {
                    ScanOutcome::CodeMismatch {
                        code: code.to_string(),
                    }
                } else {
                    match roster.get(id) {
                        None => ScanOutcome::UnknownId { id: id.to_string() },
                        Some(a) => match a.status {
                            Status::Inactive => ScanOutcome::Inactive {
                                id: a.id.clone(),
                                name: a.name.clone(),
                            },
                            Status::CheckedIn => ScanOutcome::AlreadyCheckedIn {
                                id: a.id.clone(),
                                name: a.name.clone(),
                            },
                            Status::NotYet => ScanOutcome::Success {
                                id: a.id.clone(),
                                name: a.name.clone(),
                            },
                        },
                    }
                }
            }
        };

        // Optimistic local commit: the roster is authoritative for the user
        // until the next sync. The remote call never blocks the door.
        if let ScanOutcome::Success { id, .. } = &outcome {
            roster.apply_check_in(store, id, Utc::now())?;
            self.last_check_in = Some(id.clone());
            notifier.check_in(id);
        }

        activity::append(store, outcome.log_entry(Utc::now()))?;

        Ok(outcome)
    }
}

/// Split `"<code>:<id>"` at the first delimiter. The id is the remainder
/// verbatim and must be non-empty.
fn parse_payload(payload: &str) -> Option<(&str, &str)> {
    let (code, id) = payload.split_once(':')?;
    if id.is_empty() {
        return None;
    }
    Some((code, id))
}
