use crate::api::HttpGateway;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::{SyncCoordinator, SyncOutcome};
use crate::db::roster::RosterStore;
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::format_ts;

/// Handle the `sync` command: one guarded wholesale pull.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Sync) {
        let store = LocalStore::open(&cfg.database)?;
        let mut roster = RosterStore::load(&store);

        let gateway = HttpGateway::new(&cfg.webapp_url, &cfg.api_token);
        let mut coordinator = SyncCoordinator::new();

        match coordinator.sync(&store, &mut roster, &gateway, cfg)? {
            SyncOutcome::Completed { count, synced_at } => {
                success(format!(
                    "Synced {} attendees (at {}).",
                    count,
                    format_ts(&synced_at)
                ));
            }
            SyncOutcome::Skipped => info("Sync already in flight."),
        }
    }
    Ok(())
}
