use chrono::Utc;
use eqc::api::ApiResponse;
use eqc::core::import::ImportLogic;
use eqc::core::sync::{SyncCoordinator, SyncOutcome};
use eqc::db::roster::RosterStore;
use eqc::db::store::{KEY_SYNC_INFO, LocalStore};
use eqc::errors::AppError;
use eqc::models::attendee::Status;
use eqc::models::sync_info::SyncInfo;

mod common;
use common::{
    MockGateway, attendee, checked_in_attendee, ok_response, setup_test_db, test_config,
    test_config_with_code,
};

#[test]
fn successful_sync_replaces_wholesale_and_stamps_freshness() {
    let db = setup_test_db("sync_success");
    let store = LocalStore::open(&db).unwrap();
    let mut roster = RosterStore::load(&store);
    // Local-only entry that the remote does not know about.
    roster
        .replace_all(&store, vec![attendee("LOCAL", "Ghost", Status::NotYet)])
        .unwrap();

    let remote_roster = vec![
        attendee("A1", "Taro", Status::NotYet),
        checked_in_attendee("B2", "Hana", Utc::now()),
    ];
    let gateway = MockGateway::returning_attendees(remote_roster.clone());
    let cfg = test_config_with_code(&db, "EVT");

    let mut coordinator = SyncCoordinator::new();
    let outcome = coordinator.sync(&store, &mut roster, &gateway, &cfg).unwrap();

    match outcome {
        SyncOutcome::Completed { count, .. } => assert_eq!(count, 2),
        other => panic!("unexpected outcome: {other:?}"),
    }

    // Wholesale: the local-only entry is gone, the remote rows are in.
    assert_eq!(roster.all(), &remote_roster[..]);

    let info: SyncInfo = store.get(KEY_SYNC_INFO);
    assert!(info.last_synced_at.is_some());
}

#[test]
fn failed_sync_leaves_roster_and_freshness_untouched() {
    let db = setup_test_db("sync_failure");
    let store = LocalStore::open(&db).unwrap();
    let mut roster = RosterStore::load(&store);
    let before = vec![attendee("A1", "Taro", Status::NotYet)];
    roster.replace_all(&store, before.clone()).unwrap();

    let cfg = test_config_with_code(&db, "EVT");
    let mut coordinator = SyncCoordinator::new();

    let gateway = MockGateway::failing("connection refused", true);
    let err = coordinator
        .sync(&store, &mut roster, &gateway, &cfg)
        .unwrap_err();
    assert!(matches!(err, AppError::Network(_)));

    // Application-level failure maps to the other error kind.
    let gateway = MockGateway::failing("bad token", false);
    let err = coordinator
        .sync(&store, &mut roster, &gateway, &cfg)
        .unwrap_err();
    assert!(matches!(err, AppError::Remote(_)));

    assert_eq!(roster.all(), &before[..]);
    let info: SyncInfo = store.get(KEY_SYNC_INFO);
    assert_eq!(info.last_synced_at, None);

    // The guard cleared after the failure: a retry is allowed.
    let gateway = MockGateway::returning_attendees(before.clone());
    assert!(coordinator.sync(&store, &mut roster, &gateway, &cfg).is_ok());
}

#[test]
fn sync_without_remote_config_never_touches_the_network() {
    let db = setup_test_db("sync_no_config");
    let store = LocalStore::open(&db).unwrap();
    let mut roster = RosterStore::load(&store);

    let cfg = test_config(&db);
    let gateway = MockGateway::returning_attendees(Vec::new());

    let mut coordinator = SyncCoordinator::new();
    let err = coordinator
        .sync(&store, &mut roster, &gateway, &cfg)
        .unwrap_err();

    assert!(matches!(err, AppError::Config(_)));
    assert!(gateway.recorded_calls().is_empty());
}

#[test]
fn import_parses_csv_with_optional_header() {
    let with_header = "name,email,note\nTaro,taro@example.com,VIP\nHana,,\n";
    let rows = ImportLogic::parse_rows(with_header.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Taro");
    assert_eq!(rows[0].email.as_deref(), Some("taro@example.com"));
    assert_eq!(rows[0].note.as_deref(), Some("VIP"));
    assert_eq!(rows[1].email, None);
    assert!(rows.iter().all(|r| r.status == Status::NotYet));

    // No header: the first row is data.
    let without_header = "Taro,taro@example.com\nHana\n";
    let rows = ImportLogic::parse_rows(without_header.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);

    // Blank names are dropped, fields are trimmed.
    let messy = "name,email\n  Taro  , taro@example.com \n,orphan@example.com\n\n";
    let rows = ImportLogic::parse_rows(messy.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Taro");
}

#[test]
fn import_upserts_then_pull_replaces_prior_local_entries() {
    let db = setup_test_db("import_refresh");
    let store = LocalStore::open(&db).unwrap();
    let mut roster = RosterStore::load(&store);
    roster
        .replace_all(&store, vec![attendee("OLD", "Stale", Status::NotYet)])
        .unwrap();

    let rows =
        ImportLogic::parse_rows("name,email\nTaro,taro@example.com\nHana,\n".as_bytes()).unwrap();

    // The remote assigns ids during the upsert; the follow-up pull returns
    // the authoritative roster including them.
    let server_side = vec![
        attendee("N1", "Taro", Status::NotYet),
        attendee("N2", "Hana", Status::NotYet),
    ];
    let mut gateway = MockGateway::returning_attendees(server_side.clone());
    gateway.upsert_response = ApiResponse {
        inserted: Some(2),
        updated: Some(0),
        ..ok_response()
    };

    let cfg = test_config_with_code(&db, "EVT");
    let report = ImportLogic::run(&store, &mut roster, &gateway, &cfg, &rows).unwrap();

    assert_eq!(report.inserted, 2);
    assert_eq!(report.updated, 0);
    assert_eq!(roster.all(), &server_side[..]);
    assert_eq!(
        gateway.recorded_calls(),
        vec!["upsertAttendees:2".to_string(), "getAttendees".to_string()]
    );
}

#[test]
fn import_with_no_rows_or_failed_upsert_changes_nothing() {
    let db = setup_test_db("import_failure");
    let store = LocalStore::open(&db).unwrap();
    let mut roster = RosterStore::load(&store);
    let before = vec![attendee("A1", "Taro", Status::NotYet)];
    roster.replace_all(&store, before.clone()).unwrap();

    let cfg = test_config_with_code(&db, "EVT");

    let gateway = MockGateway::returning_attendees(Vec::new());
    let err = ImportLogic::run(&store, &mut roster, &gateway, &cfg, &[]).unwrap_err();
    assert!(matches!(err, AppError::Import(_)));
    assert!(gateway.recorded_calls().is_empty());

    let rows = ImportLogic::parse_rows("Taro\n".as_bytes()).unwrap();
    let gateway = MockGateway::failing("quota exceeded", false);
    let err = ImportLogic::run(&store, &mut roster, &gateway, &cfg, &rows).unwrap_err();
    assert!(matches!(err, AppError::Remote(_)));
    assert_eq!(roster.all(), &before[..]);
}
