use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::roster::RosterStore;
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::models::attendee::Attendee;
use crate::ui::messages::info;
use crate::utils::table::Table;
use crate::utils::time::format_ts_opt;

/// Handle the `list` command: administrative roster table.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, search } = cmd {
        let store = LocalStore::open(&cfg.database)?;
        let roster = RosterStore::load(&store);

        let query = search.as_deref().map(str::to_lowercase);
        let mut shown: Vec<&Attendee> = roster
            .all()
            .iter()
            .filter(|a| filter.matches(a.status))
            .filter(|a| match &query {
                None => true,
                Some(q) => matches_query(a, q),
            })
            .collect();

        if shown.is_empty() {
            info("No attendees match.");
            return Ok(());
        }

        shown.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let mut table = Table::new(&["ID", "NAME", "EMAIL", "STATUS", "CHECKED IN AT"]);
        for a in &shown {
            table.add_row(vec![
                a.id.clone(),
                a.name.clone(),
                a.email.clone().unwrap_or_else(|| "--".to_string()),
                a.status.as_str().to_string(),
                format_ts_opt(&a.checked_in_at),
            ]);
        }

        print!("{}", table.render());
        println!("Total: {} / {}", shown.len(), roster.len());
    }
    Ok(())
}

/// Case-insensitive substring match on name, email and id.
fn matches_query(a: &Attendee, q: &str) -> bool {
    a.name.to_lowercase().contains(q)
        || a.id.to_lowercase().contains(q)
        || a.email
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains(q))
}
