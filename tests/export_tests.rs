use chrono::Utc;
use predicates::str::contains;
use std::fs;

mod common;
use common::{attendee, checked_in_attendee, eqc, seed_roster, setup_test_db, temp_out};
use eqc::models::attendee::{Attendee, Status};

fn seeded_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    seed_roster(
        &db_path,
        vec![
            Attendee {
                email: Some("taro@example.com".to_string()),
                note: Some("speaker".to_string()),
                ..attendee("A1", "Taro", Status::NotYet)
            },
            checked_in_attendee("B2", "Hana", Utc::now()),
        ],
    );
    db_path
}

#[test]
fn test_export_csv() {
    let db_path = seeded_db("export_csv");
    let out = temp_out("export_csv", "csv");

    eqc()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,name,email,note,status,checked_in_at"
    );
    assert!(content.contains("A1,Taro,taro@example.com,speaker,not_yet,"));
    assert!(content.contains("B2,Hana"));
    assert!(content.contains("checked_in"));
}

#[test]
fn test_export_json() {
    let db_path = seeded_db("export_json");
    let out = temp_out("export_json", "json");

    eqc()
        .args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], "A1");
    assert_eq!(rows[0]["email"], "taro@example.com");
    assert_eq!(rows[1]["status"], "checked_in");
    // Optional fields export as empty strings, not nulls.
    assert_eq!(rows[1]["note"], "");
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = seeded_db("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "precious").unwrap();

    eqc()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("already exists"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "precious");

    eqc()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("id,name"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = seeded_db("export_relative");

    eqc()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "csv",
            "--file",
            "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_empty_roster_warns() {
    let db_path = setup_test_db("export_empty");
    seed_roster(&db_path, Vec::new());
    let out = temp_out("export_empty", "csv");

    eqc()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("No attendees to export"));
    assert!(fs::metadata(&out).is_err());
}
