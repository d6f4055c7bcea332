use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::roster::RosterStore;
use crate::db::store::{KEY_SYNC_INFO, LocalStore};
use crate::errors::AppResult;
use crate::models::attendee::Status;
use crate::models::sync_info::SyncInfo;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::time::format_ts_opt;

/// Handle the `status` command: configuration summary, roster tally and
/// sync freshness at a glance.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Status) {
        let store = LocalStore::open(&cfg.database)?;
        let roster = RosterStore::load(&store);
        let t = roster.tally();
        let sync_info: SyncInfo = store.get(KEY_SYNC_INFO);

        header("eqc status");

        println!(
            "⚙️  Remote URL : {}",
            if cfg.webapp_url.trim().is_empty() {
                "(unset)"
            } else {
                &cfg.webapp_url
            }
        );
        println!(
            "🔑 API token  : {}",
            if cfg.api_token.trim().is_empty() {
                "(unset)"
            } else {
                "(set)"
            }
        );
        println!(
            "🎫 Event code : {}",
            if cfg.event_code.is_empty() {
                "(any)"
            } else {
                &cfg.event_code
            }
        );
        println!("🗄️  Database   : {}", cfg.database);
        println!();

        println!("👥 Roster: {} attendees", t.total);
        println!(
            "   {}checked_in{} : {}",
            color_for_status(Status::CheckedIn),
            RESET,
            t.checked_in
        );
        println!(
            "   {}not_yet{}    : {}",
            color_for_status(Status::NotYet),
            RESET,
            t.not_yet
        );
        println!(
            "   {}inactive{}   : {}",
            color_for_status(Status::Inactive),
            RESET,
            t.inactive
        );
        println!();

        println!(
            "🔄 Last sync  : {}",
            format_ts_opt(&sync_info.last_synced_at)
        );
    }
    Ok(())
}
