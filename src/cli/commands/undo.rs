use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

/// Handle the `undo` command.
///
/// The undo slot is in-memory and one level deep, scoped to the process
/// that performed the check-in. A fresh invocation therefore never has
/// anything staged; the working path is `/undo` inside `eqc scan`.
pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Undo { .. } = cmd {
        info("Undo targets the most recent check-in of a running session: use /undo inside `eqc scan`.");
        return Err(AppError::NothingToUndo);
    }
    Ok(())
}
