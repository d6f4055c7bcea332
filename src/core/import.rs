//! CSV import: parse rows, push them to the remote roster, refresh local.

use crate::api::{Gateway, ImportRow};
use crate::config::Config;
use crate::core::sync::SyncCoordinator;
use crate::db::roster::RosterStore;
use crate::db::store::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::io::Read;

#[derive(Debug)]
pub struct ImportReport {
    pub inserted: u32,
    pub updated: u32,
}

/// High-level business logic for the `import` command.
pub struct ImportLogic;

impl ImportLogic {
    /// Parse `name,email,note` rows. A leading header row (first field
    /// `name` or `id`, case-insensitive) is skipped, as are rows with an
    /// empty name. Every parsed row starts out as not yet arrived.
    pub fn parse_rows<R: Read>(reader: R) -> AppResult<Vec<ImportRow>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let name = record.get(0).unwrap_or("").to_string();

            if i == 0 {
                let lead = name.to_ascii_lowercase();
                if lead == "name" || lead == "id" {
                    continue;
                }
            }
            if name.is_empty() {
                continue;
            }

            rows.push(ImportRow::new(
                name,
                non_empty(record.get(1)),
                non_empty(record.get(2)),
            ));
        }

        Ok(rows)
    }

    /// Upsert `rows` into the remote roster, then refresh the local
    /// snapshot with a full pull. The refresh is best-effort: the upsert
    /// already landed, so a pull failure is only warned about.
    pub fn run(
        store: &LocalStore,
        roster: &mut RosterStore,
        gateway: &dyn Gateway,
        config: &Config,
        rows: &[ImportRow],
    ) -> AppResult<ImportReport> {
        config.require_remote()?;

        if rows.is_empty() {
            return Err(AppError::Import("no importable rows found".to_string()));
        }

        let res = gateway.upsert_attendees(rows);
        if !res.ok {
            return Err(if res.is_network_error {
                AppError::Network(res.error_message())
            } else {
                AppError::Remote(res.error_message())
            });
        }

        let report = ImportReport {
            inserted: res.inserted.unwrap_or(0),
            updated: res.updated.unwrap_or(0),
        };

        let mut coordinator = SyncCoordinator::new();
        if let Err(e) = coordinator.sync(store, roster, gateway, config) {
            warning(format!("Roster refresh after import failed: {e}"));
        }

        Ok(report)
    }
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
