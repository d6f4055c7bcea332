use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projection::merged_activity;
use crate::db::activity;
use crate::db::roster::RosterStore;
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::models::activity::LogResult;
use crate::ui::messages::success;
use crate::utils::time::format_ts;
use ansi_term::Colour;

/// Severity color for one activity row.
fn color_for_result(result: LogResult) -> Colour {
    match result {
        LogResult::Success => Colour::Green,
        LogResult::Warn => Colour::Yellow,
        LogResult::Error => Colour::Red,
        LogResult::Undo => Colour::Blue,
    }
}

/// Handle the `log` command: merged activity view, newest first.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { limit, clear } = cmd {
        let store = LocalStore::open(&cfg.database)?;

        if *clear {
            activity::clear(&store)?;
            success("Activity log cleared.");
            return Ok(());
        }

        let roster = RosterStore::load(&store);
        let local = activity::recent(&store);
        let merged = merged_activity(roster.all(), &local);

        if merged.is_empty() {
            println!("No activity yet.");
            return Ok(());
        }

        let shown = match limit {
            Some(n) => &merged[..merged.len().min(*n)],
            None => &merged[..],
        };

        println!("📜 Activity log ({} entries):\n", shown.len());

        for entry in shown {
            // Pad before coloring so the ANSI codes stay out of the width.
            let label = format!("{:<7}", entry.result.as_str());
            println!(
                "{} | {} | {} => {}",
                format_ts(&entry.ts),
                color_for_result(entry.result).paint(label),
                entry.who(),
                entry.message
            );
        }
    }
    Ok(())
}
