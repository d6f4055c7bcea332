use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::CheckInEngine;
use crate::core::notify::RemoteNotifier;
use crate::db::roster::RosterStore;
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::ui::messages::outcome_banner;
use std::time::Duration;

/// Handle the `checkin` command: one manual check-in through the same
/// engine the scan session uses (same validation, same log, same remote
/// confirmation).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin { id } = cmd {
        let store = LocalStore::open(&cfg.database)?;
        let mut roster = RosterStore::load(&store);

        let mut engine = CheckInEngine::new(Duration::from_millis(cfg.result_hold_ms));
        let mut notifier = RemoteNotifier::from_config(cfg);

        if let Some(outcome) = engine.handle_manual(&store, &mut roster, cfg, &mut notifier, id)? {
            outcome_banner(outcome.log_result(), outcome.subject(), outcome.message());
        }

        notifier.drain();
    }
    Ok(())
}
