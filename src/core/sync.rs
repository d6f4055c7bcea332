//! Guarded wholesale pull of the remote roster.

use crate::api::Gateway;
use crate::config::Config;
use crate::db::roster::RosterStore;
use crate::db::store::{KEY_SYNC_INFO, LocalStore};
use crate::errors::{AppError, AppResult};
use crate::models::sync_info::SyncInfo;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Completed {
        count: usize,
        synced_at: DateTime<Utc>,
    },
    /// A sync was already in flight; this request was dropped, not queued.
    Skipped,
}

/// The remote owns roster membership and metadata; the local device owns
/// "did I just check this person in" until the remote catches up. A pull
/// that lands inside that window can visually revert a fresh check-in.
/// Accepted: wholesale replace keeps the state model simple.
#[derive(Default)]
pub struct SyncCoordinator {
    in_flight: bool,
}

impl SyncCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(
        &mut self,
        store: &LocalStore,
        roster: &mut RosterStore,
        gateway: &dyn Gateway,
        config: &Config,
    ) -> AppResult<SyncOutcome> {
        config.require_remote()?;

        if self.in_flight {
            return Ok(SyncOutcome::Skipped);
        }

        self.in_flight = true;
        let result = pull(store, roster, gateway);
        self.in_flight = false;

        result
    }
}

fn pull(
    store: &LocalStore,
    roster: &mut RosterStore,
    gateway: &dyn Gateway,
) -> AppResult<SyncOutcome> {
    let res = gateway.fetch_attendees();
    if !res.ok {
        // Roster and sync info stay untouched on any failure.
        return Err(if res.is_network_error {
            AppError::Network(res.error_message())
        } else {
            AppError::Remote(res.error_message())
        });
    }

    let attendees = res.attendees.unwrap_or_default();
    let count = attendees.len();
    roster.replace_all(store, attendees)?;

    let synced_at = Utc::now();
    store.put(
        KEY_SYNC_INFO,
        &SyncInfo {
            last_synced_at: Some(synced_at),
        },
    )?;

    Ok(SyncOutcome::Completed { count, synced_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResponse, ImportRow};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGateway {
        calls: AtomicUsize,
    }

    impl Gateway for CountingGateway {
        fn ping(&self) -> ApiResponse {
            unreachable!()
        }
        fn fetch_attendees(&self) -> ApiResponse {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ApiResponse {
                ok: true,
                attendees: Some(Vec::new()),
                ..ApiResponse::default()
            }
        }
        fn upsert_attendees(&self, _rows: &[ImportRow]) -> ApiResponse {
            unreachable!()
        }
        fn check_in(&self, _id: &str) -> ApiResponse {
            unreachable!()
        }
        fn undo_check_in(&self, _id: &str) -> ApiResponse {
            unreachable!()
        }
    }

    fn remote_config() -> Config {
        Config {
            webapp_url: "https://example.invalid/exec".to_string(),
            api_token: "token".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn overlapping_sync_is_dropped_without_a_remote_call() {
        let store = LocalStore::open(":memory:").unwrap();
        let mut roster = RosterStore::load(&store);
        let gateway = CountingGateway {
            calls: AtomicUsize::new(0),
        };
        let config = remote_config();

        let mut coordinator = SyncCoordinator::new();
        coordinator.in_flight = true;

        let outcome = coordinator
            .sync(&store, &mut roster, &gateway, &config)
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Skipped);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);

        // Once the in-flight sync settles, the next request runs.
        coordinator.in_flight = false;
        let outcome = coordinator
            .sync(&store, &mut roster, &gateway, &config)
            .unwrap();
        assert!(matches!(outcome, SyncOutcome::Completed { .. }));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }
}
