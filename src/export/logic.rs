use crate::db::roster::RosterStore;
use crate::db::store::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendeeExport;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level logic for the `export` command.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the current roster snapshot to `file` in the given format.
    /// `file` must be an absolute path.
    pub fn export(
        store: &LocalStore,
        format: &ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let roster = RosterStore::load(store);
        if roster.is_empty() {
            warning("No attendees to export.");
            return Ok(());
        }

        let rows: Vec<AttendeeExport> = roster
            .all()
            .iter()
            .map(AttendeeExport::from_attendee)
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(())
    }
}
