#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use eqc::api::{ApiResponse, Gateway, ImportRow};
use eqc::config::Config;
use eqc::db::roster::RosterStore;
use eqc::db::store::LocalStore;
use eqc::models::attendee::{Attendee, Status};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

pub fn eqc() -> Command {
    let mut cmd = cargo_bin_cmd!("eqc");
    // Point HOME/APPDATA somewhere harmless so the real config never leaks in.
    cmd.env("HOME", env::temp_dir());
    cmd.env("APPDATA", env::temp_dir());
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_eqc.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path and ensure it's removed.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// A config pointing at the test store, with no remote configured.
pub fn test_config(db_path: &str) -> Config {
    Config {
        database: db_path.to_string(),
        ..Config::default()
    }
}

/// Same, with an event code set and remote credentials present.
pub fn test_config_with_code(db_path: &str, code: &str) -> Config {
    Config {
        database: db_path.to_string(),
        webapp_url: "https://example.invalid/exec".to_string(),
        api_token: "token".to_string(),
        event_code: code.to_string(),
        ..Config::default()
    }
}

pub fn attendee(id: &str, name: &str, status: Status) -> Attendee {
    Attendee {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        note: None,
        status,
        checked_in_at: None,
    }
}

pub fn checked_in_attendee(id: &str, name: &str, at: DateTime<Utc>) -> Attendee {
    Attendee {
        checked_in_at: Some(at),
        status: Status::CheckedIn,
        ..attendee(id, name, Status::NotYet)
    }
}

/// Seed a roster snapshot directly through the library, the way a prior
/// sync would have left it.
pub fn seed_roster(db_path: &str, attendees: Vec<Attendee>) {
    let store = LocalStore::open(db_path).expect("open store");
    let mut roster = RosterStore::load(&store);
    roster.replace_all(&store, attendees).expect("seed roster");
}

/// Canned-response gateway that records every call it receives.
pub struct MockGateway {
    pub fetch_response: ApiResponse,
    pub upsert_response: ApiResponse,
    pub calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn returning_attendees(attendees: Vec<Attendee>) -> Self {
        Self {
            fetch_response: ApiResponse {
                ok: true,
                attendees: Some(attendees),
                ..ApiResponse::default()
            },
            upsert_response: ok_response(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str, is_network_error: bool) -> Self {
        let failure = ApiResponse {
            ok: false,
            error: Some(error.to_string()),
            is_network_error,
            ..ApiResponse::default()
        };
        Self {
            fetch_response: failure.clone(),
            upsert_response: failure,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn ok_response() -> ApiResponse {
    ApiResponse {
        ok: true,
        ..ApiResponse::default()
    }
}

impl Gateway for MockGateway {
    fn ping(&self) -> ApiResponse {
        self.record("ping".to_string());
        ok_response()
    }

    fn fetch_attendees(&self) -> ApiResponse {
        self.record("getAttendees".to_string());
        self.fetch_response.clone()
    }

    fn upsert_attendees(&self, rows: &[ImportRow]) -> ApiResponse {
        self.record(format!("upsertAttendees:{}", rows.len()));
        self.upsert_response.clone()
    }

    fn check_in(&self, id: &str) -> ApiResponse {
        self.record(format!("checkIn:{id}"));
        ok_response()
    }

    fn undo_check_in(&self, id: &str) -> ApiResponse {
        self.record(format!("undoCheckIn:{id}"));
        ok_response()
    }
}
