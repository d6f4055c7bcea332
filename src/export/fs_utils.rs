use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Refuse to clobber an existing file unless `--force` was given. Exports
/// may run unattended, so there is no interactive prompt here.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }
    Err(AppError::Export(format!(
        "file '{}' already exists (use --force to overwrite)",
        path.display()
    )))
}
