use crate::api::HttpGateway;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::roster::RosterStore;
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::fs::File;
use std::io::{self, BufReader};

/// Handle the `import` command: CSV rows in, remote upsert, local refresh.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, dry_run } = cmd {
        let rows = if file == "-" {
            ImportLogic::parse_rows(io::stdin().lock())?
        } else {
            ImportLogic::parse_rows(BufReader::new(File::open(file)?))?
        };

        if *dry_run {
            info(format!("{} importable rows detected.", rows.len()));
            for row in rows.iter().take(5) {
                println!("  {} ({})", row.name, row.email.as_deref().unwrap_or("--"));
            }
            if rows.len() > 5 {
                println!("  ...");
            }
            return Ok(());
        }

        let store = LocalStore::open(&cfg.database)?;
        let mut roster = RosterStore::load(&store);
        let gateway = HttpGateway::new(&cfg.webapp_url, &cfg.api_token);

        let report = ImportLogic::run(&store, &mut roster, &gateway, cfg, &rows)?;

        success(format!(
            "Imported! Inserted: {}, Updated: {}",
            report.inserted, report.updated
        ));
        info(format!("Roster now has {} attendees.", roster.len()));
    }
    Ok(())
}
