//! Unified application error type.
//! All modules (db, core, cli, api) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Per-scan rejections (unknown id, inactive, duplicate, malformed payload)
//! are NOT errors: they resolve to a scan outcome plus a log entry and never
//! escalate. Background confirmation failures are warnings only.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Persistence
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    // ---------------------------
    // Configuration
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Remote gateway
    // ---------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote error: {0}")]
    Remote(String),

    // ---------------------------
    // Check-in logic
    // ---------------------------
    #[error("No check-in to undo in this session")]
    NothingToUndo,

    // ---------------------------
    // Import / export
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
