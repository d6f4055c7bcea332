//! Interactive check-in session.
//!
//! Reads one decoded payload per line: hardware QR and barcode scanners in
//! keyboard-wedge mode emit exactly this shape, and manual input works the
//! same way. Lines starting with `/` are session commands.

use crate::api::{Gateway, HttpGateway};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::engine::CheckInEngine;
use crate::core::notify::RemoteNotifier;
use crate::core::sync::{SyncCoordinator, SyncOutcome};
use crate::db::roster::RosterStore;
use crate::db::store::{KEY_SYNC_INFO, LocalStore};
use crate::errors::AppResult;
use crate::models::sync_info::SyncInfo;
use crate::ui::messages::{header, info, outcome_banner, success, warning};
use crate::utils::time::format_ts_opt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

/// Handle the `scan` command.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { hold_ms } = cmd {
        let store = LocalStore::open(&cfg.database)?;
        let mut roster = RosterStore::load(&store);

        if roster.is_empty() {
            warning("Roster is empty. Run `eqc sync` or `eqc import` first.");
        }

        let gateway: Option<Arc<dyn Gateway>> = if cfg.has_remote() {
            Some(Arc::new(HttpGateway::new(&cfg.webapp_url, &cfg.api_token)))
        } else {
            None
        };
        let mut notifier = RemoteNotifier::new(gateway.clone());
        let mut coordinator = SyncCoordinator::new();

        let hold = Duration::from_millis(hold_ms.unwrap_or(cfg.result_hold_ms));
        let mut engine = CheckInEngine::new(hold);

        print_welcome(cfg, &roster, hold);

        let stdin = io::stdin();
        run_session(
            stdin.lock(),
            &store,
            &mut roster,
            cfg,
            &mut engine,
            &mut notifier,
            &mut coordinator,
            gateway.as_deref(),
        )?;

        // Late remote warnings still print before the tally.
        notifier.drain();

        let t = roster.tally();
        success(format!(
            "Session ended: {} checked in, {} not yet, {} inactive ({} total).",
            t.checked_in, t.not_yet, t.inactive, t.total
        ));
    }
    Ok(())
}

/// Drive one session over any line source until EOF or `/quit`.
#[allow(clippy::too_many_arguments)]
fn run_session<R: BufRead>(
    input: R,
    store: &LocalStore,
    roster: &mut RosterStore,
    cfg: &Config,
    engine: &mut CheckInEngine,
    notifier: &mut RemoteNotifier,
    coordinator: &mut SyncCoordinator,
    gateway: Option<&dyn Gateway>,
) -> AppResult<()> {
    let mut lines = input.lines();

    while let Some(line) = lines.next() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == "/quit" {
            break;
        }

        if let Some(rest) = line.strip_prefix('/') {
            session_command(
                rest,
                &mut lines,
                store,
                roster,
                cfg,
                engine,
                notifier,
                coordinator,
                gateway,
            )?;
            continue;
        }

        // A decoded payload. Gate-dropped scans render nothing.
        if let Some(outcome) = engine.handle_scan(store, roster, cfg, notifier, line)? {
            outcome_banner(outcome.log_result(), outcome.subject(), outcome.message());
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn session_command<R: BufRead>(
    rest: &str,
    lines: &mut io::Lines<R>,
    store: &LocalStore,
    roster: &mut RosterStore,
    cfg: &Config,
    engine: &mut CheckInEngine,
    notifier: &mut RemoteNotifier,
    coordinator: &mut SyncCoordinator,
    gateway: Option<&dyn Gateway>,
) -> AppResult<()> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim).unwrap_or("");

    match name {
        "checkin" => {
            if arg.is_empty() {
                warning("Usage: /checkin <id>");
            } else if let Some(outcome) =
                engine.handle_manual(store, roster, cfg, notifier, arg)?
            {
                outcome_banner(outcome.log_result(), outcome.subject(), outcome.message());
            }
        }

        "undo" => {
            let Some(target) = engine.undo_target().map(str::to_string) else {
                warning("No check-in to undo in this session.");
                return Ok(());
            };
            let label = roster
                .get(&target)
                .map(|a| a.name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| target.clone());

            print!("Undo check-in for '{label}'? [y/N]: ");
            io::stdout().flush().ok();

            let answer = lines.next().transpose()?.unwrap_or_default();
            let ans = answer.trim().to_ascii_lowercase();
            if ans == "y" || ans == "yes" {
                let outcome = engine.undo_last(store, roster, notifier)?;
                outcome_banner(outcome.log_result(), outcome.subject(), outcome.message());
            } else {
                info("Undo cancelled.");
            }
        }

        "sync" => match gateway {
            Some(gw) => match coordinator.sync(store, roster, gw, cfg) {
                Ok(SyncOutcome::Completed { count, .. }) => {
                    success(format!("Synced {count} attendees."));
                }
                Ok(SyncOutcome::Skipped) => info("Sync already in flight."),
                // Sync failures never end the session.
                Err(e) => warning(format!("Sync failed: {e}")),
            },
            None => warning("Remote not configured; set URL and token with `eqc config`."),
        },

        "status" => print_status(store, roster),

        "help" => print_help(),

        other => warning(format!("Unknown command '/{other}'; type /help.")),
    }

    Ok(())
}

fn print_welcome(cfg: &Config, roster: &RosterStore, hold: Duration) {
    header("eqc check-in session");
    let code = if cfg.event_code.is_empty() {
        "(any)"
    } else {
        cfg.event_code.as_str()
    };
    info(format!(
        "Event code: {} | Roster: {} attendees | Hold: {}ms",
        code,
        roster.len(),
        hold.as_millis()
    ));
    info("Scan a code, or type /help for commands.");
}

fn print_status(store: &LocalStore, roster: &RosterStore) {
    let t = roster.tally();
    let sync_info: SyncInfo = store.get(KEY_SYNC_INFO);
    info(format!(
        "Checked in: {} / {} ({} not yet, {} inactive) | Last sync: {}",
        t.checked_in,
        t.total,
        t.not_yet,
        t.inactive,
        format_ts_opt(&sync_info.last_synced_at)
    ));
}

fn print_help() {
    println!("Commands:");
    println!("  /checkin <id>   check in by id (manual entry)");
    println!("  /undo           undo the most recent check-in");
    println!("  /sync           pull the roster from the remote");
    println!("  /status         show tally and sync freshness");
    println!("  /help           this help");
    println!("  /quit           end the session");
    println!("Anything else is treated as a scanned payload (code:id).");
}
